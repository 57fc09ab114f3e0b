//! Case identifier extraction.

use lazy_static::lazy_static;

use super::patterns::CASE_ID;
use super::{standalone_number, FieldExtractor, Rule, RuleMatch, RuleTable};

lazy_static! {
    static ref CASE_ID_RULES: RuleTable =
        RuleTable::new(vec![Rule::new("case_id", 1, &CASE_ID, standalone_number)]);
}

/// Six digits starting with 1 or 2 after an "identification" word
/// ("ідентифікатор", "идент.", "ID"-style spellings with Latin "i").
pub struct CaseIdExtractor;

impl CaseIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CaseIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CaseIdExtractor {
    type Output = RuleMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CASE_ID_RULES.evaluate(text)
    }
}

pub fn extract_case_id(text: &str) -> Option<String> {
    CaseIdExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_case_id() {
        assert_eq!(extract_case_id("ідентифікатор 123456"), Some("123456".to_string()));
        assert_eq!(extract_case_id("Идент.№ 234567 оплата"), Some("234567".to_string()));
        assert_eq!(extract_case_id("identifier:198765"), Some("198765".to_string()));
        assert_eq!(extract_case_id("ІДЕНТИФІКАТОР;-154321"), Some("154321".to_string()));
    }

    #[test]
    fn test_first_digit_must_be_one_or_two() {
        assert_eq!(extract_case_id("ідентифікатор 323456"), None);
    }

    #[test]
    fn test_exactly_six_digits() {
        assert_eq!(extract_case_id("ідентифікатор 1234567"), None);
        assert_eq!(extract_case_id("ідентифікатор 12345"), None);
    }

    #[test]
    fn test_requires_keyword() {
        assert_eq!(extract_case_id("рахунок 123456"), None);
    }
}
