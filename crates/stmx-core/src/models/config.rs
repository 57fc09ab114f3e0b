//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the stmx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StmxConfig {
    /// Accepted header names per logical column.
    pub columns: ColumnConfig,

    /// Footer/summary row exclusion.
    pub filter: FilterConfig,

    /// Identifier extraction configuration.
    pub extraction: ExtractionConfig,

    /// Export rendering configuration.
    pub export: ExportConfig,

    /// Fan rows out across worker threads. Output order is preserved.
    pub parallel: bool,
}

/// Header names accepted for each logical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Narrative/purpose column. Exact match only.
    pub narrative: String,

    /// Credit amount candidates, first present wins.
    pub credit_amount: Vec<String>,

    /// Operation date candidates, first present wins.
    pub date: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            narrative: "Призначення платежу".to_string(),
            credit_amount: vec!["Зараховано".to_string(), "Кредит".to_string()],
            date: vec!["Дата".to_string(), "Дата операції".to_string()],
        }
    }
}

/// Report trailer exclusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Case-insensitive regexes matched against the concatenated row text.
    pub footer_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            footer_patterns: vec![
                r"(?:всього|разом)\s+оборот".to_string(),
                r"(?:всего|итого)\s+оборот".to_string(),
                r"оборот[иы]\s+за\s+период|обороти\s+за\s+період".to_string(),
                r"(?:вхідний|вихідний)\s+залишок".to_string(),
                r"(?:входящий|исходящий)\s+остаток".to_string(),
                r"сальдо\s+на\s+(?:початок|кінець|начало|конец)".to_string(),
            ],
        }
    }
}

/// Which VP rule set to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VpMode {
    /// Keyword plus number-shape rule, with the compound-number fallback.
    #[default]
    Canonical,
    /// Exactly 8 digits after "ВП", plus the semicolon-delimited
    /// 8-digit-starting-with-6 fallback used by older exports.
    Legacy,
}

/// Identifier extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// VP rule set.
    pub vp_mode: VpMode,
}

/// Export rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Render amounts with a comma as decimal separator.
    pub decimal_comma: bool,

    /// Field delimiter for CSV export.
    pub delimiter: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            decimal_comma: false,
            delimiter: ',',
        }
    }
}

impl StmxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
