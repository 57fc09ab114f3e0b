//! Runs the five sub-extractors over one narrative.

use crate::models::config::{ExtractionConfig, VpMode};
use crate::models::record::ExtractionResult;

use super::rules::{
    CaseIdExtractor, FieldExtractor, IpnExtractor, NameExtractor, VdExtractor, VpExtractor,
};

/// Trait for narrative extractors.
pub trait NarrativeExtractor {
    /// Extract every identifier class from one narrative string.
    fn extract(&self, narrative: &str) -> ExtractionResult;
}

/// Rule-based identifier extractor.
///
/// Holds no per-row state: the same narrative always yields the same result.
pub struct IdentifierExtractor {
    vd: VdExtractor,
    vp: VpExtractor,
    ipn: IpnExtractor,
    case_id: CaseIdExtractor,
    name: NameExtractor,
}

impl IdentifierExtractor {
    /// Create an extractor with the canonical rule sets.
    pub fn new() -> Self {
        Self {
            vd: VdExtractor::new(),
            vp: VpExtractor::new(),
            ipn: IpnExtractor::new(),
            case_id: CaseIdExtractor::new(),
            name: NameExtractor::new(),
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_vp_mode(config.vp_mode)
    }

    /// Set the VP rule set.
    pub fn with_vp_mode(mut self, mode: VpMode) -> Self {
        self.vp = self.vp.with_mode(mode);
        self
    }
}

impl Default for IdentifierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeExtractor for IdentifierExtractor {
    fn extract(&self, narrative: &str) -> ExtractionResult {
        ExtractionResult {
            vd: self.vd.extract(narrative).map(|m| m.value),
            vp: self.vp.extract(narrative).map(|m| m.value),
            ipn: self.ipn.extract(narrative).map(|m| m.value),
            case_id: self.case_id.extract(narrative).map(|m| m.value),
            name: self.name.extract(narrative).map(|m| m.value),
        }
    }
}
