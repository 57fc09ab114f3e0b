//! VD (court order / writ) number extraction.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{VD_GENERIC, VD_SERIES, VD_WRIT_REFERENCE};
use super::{complete_number, followed_by_digit, ContextExclusion, FieldExtractor, Rule, RuleMatch, RuleTable};

lazy_static! {
    static ref VD_RULES: RuleTable = RuleTable::new(vec![
        Rule::new("vd_series", 1, &VD_SERIES, accept_series),
        Rule::new("vd_writ_reference", 2, &VD_WRIT_REFERENCE, accept_writ_reference),
        Rule::new("vd_generic", 3, &VD_GENERIC, complete_number)
            .with_exclusion(ContextExclusion::proceeding_markers()),
    ]);
}

/// VD field extractor.
pub struct VdExtractor;

impl VdExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The ordered VD rule table.
    pub fn rules(&self) -> &'static RuleTable {
        &VD_RULES
    }
}

impl Default for VdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VdExtractor {
    type Output = RuleMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        VD_RULES.evaluate(text)
    }
}

/// Extract the VD number from a narrative.
pub fn extract_vd(text: &str) -> Option<String> {
    VdExtractor::new().extract(text).map(|m| m.value)
}

/// "ВС"/"ФС" series plus exactly nine digits, reported as "<PREFIX> <digits>".
fn accept_series(text: &str, caps: &Captures<'_>) -> Option<String> {
    let num = caps.name("num")?;
    if followed_by_digit(text, num.end()) {
        return None;
    }
    Some(format!("{} {}", caps["prefix"].to_uppercase(), num.as_str()))
}

/// "по и/д" reference; a trailing "-ип" makes it a proceeding number instead.
fn accept_writ_reference(_text: &str, caps: &Captures<'_>) -> Option<String> {
    let num = &caps["num"];
    if caps.name("suffix").is_some() && num.ends_with('-') {
        return None;
    }
    let value = num.trim_end_matches(['-', '/']);
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rule() {
        assert_eq!(extract_vd("стягнення за фс№123456789 від"), Some("ФС 123456789".to_string()));
        assert_eq!(extract_vd("ВС 987654321"), Some("ВС 987654321".to_string()));
    }

    #[test]
    fn test_series_rejects_longer_numbers() {
        let extractor = VdExtractor::new();
        assert_eq!(extractor.rules().rules()[0].evaluate("ФС 1234567890"), None);
    }

    #[test]
    fn test_series_beats_generic() {
        let m = VdExtractor::new().extract("ВД №555 ФС123456789").unwrap();
        assert_eq!(m.value, "ФС 123456789");
        assert_eq!(m.rule, "vd_series");
    }

    #[test]
    fn test_series_with_spaced_number_sign() {
        assert_eq!(
            extract_vd("на підставі серії ФС № 123456789"),
            Some("ФС 123456789".to_string())
        );
        assert_eq!(extract_vd("ВС :  987654321"), Some("ВС 987654321".to_string()));
    }

    #[test]
    fn test_writ_reference() {
        assert_eq!(extract_vd("Стягнення по и/д №2-1234/2023"), Some("2-1234/2023".to_string()));
        assert_eq!(extract_vd("по И/Д 754/19"), Some("754/19".to_string()));
    }

    #[test]
    fn test_writ_reference_with_proceeding_suffix_is_rejected() {
        let extractor = VdExtractor::new();
        let rule = &extractor.rules().rules()[1];
        assert_eq!(rule.name, "vd_writ_reference");
        assert_eq!(rule.evaluate("по и/д №12345-ип"), None);
        assert_eq!(rule.evaluate("по и/д №12345-ИП"), None);
    }

    #[test]
    fn test_generic_keywords() {
        assert_eq!(extract_vd("згідно виконавчого листа №2/456/2022"), Some("2/456/2022".to_string()));
        assert_eq!(extract_vd("судовий наказ 2-123/19"), Some("2-123/19".to_string()));
        assert_eq!(extract_vd("исполнительный лист # 7788"), Some("7788".to_string()));
        assert_eq!(extract_vd("В.Д. 4411"), Some("4411".to_string()));
        assert_eq!(extract_vd("ВД№12345 ВП№87654321"), Some("12345".to_string()));
    }

    #[test]
    fn test_generic_rejects_five_segments() {
        assert_eq!(extract_vd("ВД 1/2/3/4/5"), None);
    }

    #[test]
    fn test_generic_vetoed_by_marker() {
        assert_eq!(extract_vd("ВД №12345 ип"), None);
        assert_eq!(extract_vd("ВД 12345-ИП"), None);
        assert_eq!(extract_vd("исп. ВД 12345"), None);
    }

    #[test]
    fn test_veto_does_not_block_earlier_rules() {
        assert_eq!(extract_vd("ФС 123456789 ВД 12345 ип"), Some("ФС 123456789".to_string()));
    }

    #[test]
    fn test_no_vd() {
        assert_eq!(extract_vd("Оплата за послуги"), None);
        assert_eq!(extract_vd(""), None);
    }
}
