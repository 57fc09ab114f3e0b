//! Header normalization and required-column resolution.

use serde::Serialize;
use tracing::debug;

use crate::error::MissingColumnsError;
use crate::models::config::ColumnConfig;

/// Logical field names used in diagnostics.
pub const NARRATIVE: &str = "narrative";
pub const CREDIT_AMOUNT: &str = "credit_amount";
pub const DATE: &str = "date";

/// Trim, strip byte-order marks and collapse internal whitespace (including
/// non-breaking spaces) to single spaces.
pub fn normalize_header(header: &str) -> String {
    header
        .replace('\u{feff}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Positions of the required columns in a table's header list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    pub narrative: usize,
    pub credit_amount: usize,
    pub date: usize,
}

/// Maps logical fields to the header actually present.
pub struct ColumnResolver {
    columns: ColumnConfig,
}

impl ColumnResolver {
    pub fn new(columns: ColumnConfig) -> Self {
        Self { columns }
    }

    /// Resolve against already-normalized headers.
    ///
    /// The narrative header must match exactly; credit amount and date take
    /// the first candidate present. Every missing field is reported at once.
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns, MissingColumnsError> {
        let position = |name: &str| {
            let wanted = normalize_header(name);
            headers.iter().position(|h| *h == wanted)
        };
        let first_of = |candidates: &[String]| candidates.iter().find_map(|c| position(c.as_str()));

        let narrative = position(self.columns.narrative.as_str());
        let credit_amount = first_of(&self.columns.credit_amount);
        let date = first_of(&self.columns.date);

        match (narrative, credit_amount, date) {
            (Some(narrative), Some(credit_amount), Some(date)) => {
                debug!(
                    "Resolved columns: narrative={}, credit_amount={}, date={}",
                    headers[narrative], headers[credit_amount], headers[date]
                );
                Ok(ResolvedColumns {
                    narrative,
                    credit_amount,
                    date,
                })
            }
            _ => {
                let missing = [
                    (NARRATIVE, narrative),
                    (CREDIT_AMOUNT, credit_amount),
                    (DATE, date),
                ]
                .iter()
                .filter(|(_, found)| found.is_none())
                .map(|(field, _)| field.to_string())
                .collect();

                Err(MissingColumnsError {
                    missing,
                    detected: headers.to_vec(),
                })
            }
        }
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(ColumnConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|h| normalize_header(h)).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}Дата"), "Дата");
        assert_eq!(normalize_header("  Дата\u{00a0}\u{00a0}операції "), "Дата операції");
        assert_eq!(normalize_header("Призначення\tплатежу"), "Призначення платежу");
    }

    #[test]
    fn test_resolve_first_candidate() {
        let resolver = ColumnResolver::default();
        let cols = resolver
            .resolve(&headers(&["Дата операції", "Кредит", "Зараховано", "Призначення платежу"]))
            .unwrap();

        assert_eq!(
            cols,
            ResolvedColumns {
                narrative: 3,
                credit_amount: 2,
                date: 0,
            }
        );
    }

    #[test]
    fn test_resolve_after_normalization() {
        let resolver = ColumnResolver::default();
        let cols = resolver
            .resolve(&headers(&["\u{feff}Дата", "Призначення  платежу", " Кредит "]))
            .unwrap();
        assert_eq!(cols.date, 0);
        assert_eq!(cols.narrative, 1);
        assert_eq!(cols.credit_amount, 2);
    }

    #[test]
    fn test_narrative_has_no_fallback() {
        let resolver = ColumnResolver::default();
        let err = resolver
            .resolve(&headers(&["Дата", "Зараховано", "Призначення"]))
            .unwrap_err();

        assert_eq!(err.missing, vec!["narrative"]);
        assert_eq!(err.detected, vec!["Дата", "Зараховано", "Призначення"]);
    }

    #[test]
    fn test_all_missing_reported() {
        let resolver = ColumnResolver::default();
        let err = resolver.resolve(&headers(&["A", "B"])).unwrap_err();
        assert_eq!(err.missing, vec!["narrative", "credit_amount", "date"]);
    }
}
