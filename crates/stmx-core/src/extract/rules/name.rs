//! Debtor full name extraction.
//!
//! Two tiers: a labelled name ("Боржник: Іванов Петро Сергійович") and, if
//! none is found, the first capitalized two-to-three word sequence in the text.

use super::patterns::{COMPANY_MARKERS, NAME_LABELLED, NAME_SEQUENCE_AT, NAME_TOKEN_START, WORD};
use super::{FieldExtractor, RuleMatch};

/// Name field extractor.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Tier 1: name after an explicit label.
    pub fn labelled(&self, text: &str) -> Option<RuleMatch> {
        NAME_LABELLED.captures_iter(text).find_map(|caps| {
            let m = caps.name("name")?;
            if m.as_str().split_whitespace().any(is_company_marker) {
                return None;
            }
            let (name, len) = clean_candidate(m.as_str())?;
            Some(RuleMatch {
                value: name,
                rule: "name_labelled",
                position: (m.start(), m.start() + len),
            })
        })
    }

    /// Tier 2: first capitalized word sequence not led by a company marker.
    ///
    /// A sequence rejected for its marker or a digit is skipped as a whole.
    pub fn fallback(&self, text: &str) -> Option<RuleMatch> {
        let mut pos = 0;
        while let Some(token) = NAME_TOKEN_START.find_at(text, pos) {
            let start = token.start();
            let Some(m) = NAME_SEQUENCE_AT.find(&text[start..]) else {
                pos = token.end();
                continue;
            };

            if m.as_str().split_whitespace().next().is_some_and(is_company_marker) {
                pos = start + m.end();
                continue;
            }

            match clean_candidate(m.as_str()) {
                Some((name, len)) => {
                    return Some(RuleMatch {
                        value: name,
                        rule: "name_fallback",
                        position: (start, start + len),
                    });
                }
                None if has_digit(m.as_str()) => pos = start + m.end(),
                None => pos = token.end(),
            }
        }
        None
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = RuleMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.labelled(text).or_else(|| self.fallback(text))
    }
}

/// Extract the debtor name from a narrative.
pub fn extract_name(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}

/// Keep the leading capitalized tokens up to the first all-caps one, strip a
/// digit fragment glued to the last token and reject anything that still
/// carries a digit or has fewer than two tokens.
///
/// Returns the name and the byte length it covers in `raw`.
fn clean_candidate(raw: &str) -> Option<(String, usize)> {
    let words: Vec<_> = WORD
        .find_iter(raw)
        .take_while(|w| !is_all_caps(w.as_str()))
        .collect();
    let (last, leading) = words.split_last()?;

    let tail = last.as_str().trim_end_matches(|c: char| c.is_ascii_digit());
    let name = leading
        .iter()
        .map(|w| w.as_str())
        .chain(std::iter::once(tail))
        .collect::<Vec<_>>()
        .join(" ");

    if words.len() < 2 || tail.is_empty() || has_digit(&name) {
        return None;
    }
    Some((name, last.start() + tail.len()))
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// Abbreviations such as "ВП" or "ТОВ": every letter uppercase, two or more.
fn is_all_caps(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

fn is_company_marker(token: &str) -> bool {
    let upper = token
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_uppercase();
    COMPANY_MARKERS.contains(&upper.as_str()) || upper.contains("БАНК")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_name() {
        assert_eq!(
            extract_name("Боржник: Іванов Петро Сергійович ВД№12345"),
            Some("Іванов Петро Сергійович".to_string())
        );
        assert_eq!(
            extract_name("оплата; ПІБ - Коваль Олена"),
            Some("Коваль Олена".to_string())
        );
        assert_eq!(
            extract_name("платник: Сидоренко Ірина Миколаївна, 1000 грн"),
            Some("Сидоренко Ірина Миколаївна".to_string())
        );
    }

    #[test]
    fn test_labelled_beats_fallback() {
        let m = NameExtractor::new()
            .extract("Стягнення Аліментів Отримувач: Бондар Марія")
            .unwrap();
        assert_eq!(m.value, "Бондар Марія");
        assert_eq!(m.rule, "name_labelled");
    }

    #[test]
    fn test_trailing_digits_stripped() {
        assert_eq!(
            extract_name("Боржник: Шевченко Тарас Григорович123"),
            Some("Шевченко Тарас Григорович".to_string())
        );
    }

    #[test]
    fn test_digit_inside_rejected() {
        assert_eq!(NameExtractor::new().labelled("Боржник: Шевченко1 Тарас"), None);
    }

    #[test]
    fn test_labelled_company_rejected() {
        assert_eq!(NameExtractor::new().labelled("Отримувач: Приватбанк Київ"), None);
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(
            extract_name("аліменти з Петренко Іван Іванович за березень"),
            Some("Петренко Іван Іванович".to_string())
        );
    }

    #[test]
    fn test_fallback_skips_company_lead() {
        assert_eq!(
            extract_name("переказ через Ощадбанк Київ від Мельник Андрій"),
            Some("Мельник Андрій".to_string())
        );
    }

    #[test]
    fn test_no_name() {
        assert_eq!(extract_name("service fee"), None);
        assert_eq!(extract_name("Оплата за послуги"), None);
        assert_eq!(extract_name(""), None);
    }

    #[test]
    fn test_labelled_company_with_all_caps_marker() {
        let extractor = NameExtractor::new();
        assert_eq!(extractor.labelled("Платник: ТОВ Ромашка Плюс"), None);
        assert_eq!(extractor.labelled("Боржник: ФОП Коваль Олена Петрівна"), None);
        assert_eq!(extract_name("Платник: ТОВ Ромашка Плюс"), None);
    }

    #[test]
    fn test_fallback_skips_whole_company_sequence() {
        let extractor = NameExtractor::new();
        assert_eq!(extractor.fallback("переказ ТОВ Ромашка Плюс"), None);
        assert_eq!(extractor.fallback("оплата ФОП Коваль Олена"), None);
        assert_eq!(
            extract_name("переказ ТОВ Ромашка Плюс від Мельник Андрій"),
            Some("Мельник Андрій".to_string())
        );
    }

    #[test]
    fn test_abbreviation_ends_name() {
        assert_eq!(
            extract_name("Боржник: Коваль Олена ВП№61234567"),
            Some("Коваль Олена".to_string())
        );
        assert_eq!(
            extract_name("утримання Київ ВП Бондар Марія"),
            Some("Бондар Марія".to_string())
        );
    }

    #[test]
    fn test_fallback_digit_rejected() {
        assert_eq!(NameExtractor::new().fallback("переказ Шевченко1 Тарас Петрович"), None);
    }

    #[test]
    fn test_fallback_trailing_digits_stripped() {
        let m = NameExtractor::new()
            .fallback("аліменти Петренко Іван Іванович2024 березень")
            .unwrap();
        assert_eq!(m.value, "Петренко Іван Іванович");
        assert_eq!(m.rule, "name_fallback");
    }
}
