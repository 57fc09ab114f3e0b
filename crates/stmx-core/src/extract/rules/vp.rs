//! VP (enforcement proceeding) number extraction.

use lazy_static::lazy_static;

use crate::models::config::VpMode;

use super::patterns::{VP_COMPOUND, VP_KEYWORD, VP_LEGACY_KEYWORD, VP_LEGACY_SEMICOLON};
use super::{complete_number, standalone_number, FieldExtractor, Rule, RuleMatch, RuleTable};

lazy_static! {
    static ref VP_RULES: RuleTable = RuleTable::new(vec![
        Rule::new("vp_keyword", 1, &VP_KEYWORD, complete_number),
        Rule::new("vp_compound", 2, &VP_COMPOUND, complete_number),
    ]);

    static ref VP_LEGACY_RULES: RuleTable = RuleTable::new(vec![
        Rule::new("vp_legacy_keyword", 1, &VP_LEGACY_KEYWORD, standalone_number),
        Rule::new("vp_legacy_semicolon", 2, &VP_LEGACY_SEMICOLON, standalone_number),
    ]);
}

/// VP field extractor.
pub struct VpExtractor {
    mode: VpMode,
}

impl VpExtractor {
    /// Create a new VP extractor using the canonical rules.
    pub fn new() -> Self {
        Self {
            mode: VpMode::Canonical,
        }
    }

    /// Select the rule set.
    pub fn with_mode(mut self, mode: VpMode) -> Self {
        self.mode = mode;
        self
    }

    /// The rule table for the selected mode.
    pub fn rules(&self) -> &'static RuleTable {
        match self.mode {
            VpMode::Canonical => &VP_RULES,
            VpMode::Legacy => &VP_LEGACY_RULES,
        }
    }
}

impl Default for VpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VpExtractor {
    type Output = RuleMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.rules().evaluate(text)
    }
}

/// Extract the VP number from a narrative with the canonical rules.
pub fn extract_vp(text: &str) -> Option<String> {
    VpExtractor::new().extract(text).map(|m| m.value)
}
