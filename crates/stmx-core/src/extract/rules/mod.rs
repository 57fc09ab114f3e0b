//! Rule-based field extractors for statement narratives.
//!
//! Each identifier class is described by a [`RuleTable`]: an ordered list of
//! [`Rule`]s, each carrying a pattern, an acceptance function and an optional
//! [`ContextExclusion`]. The table is evaluated first-match-wins in priority
//! order, so every rule can be exercised on its own.

pub mod amounts;
pub mod case_id;
pub mod dates;
pub mod ipn;
pub mod name;
pub mod patterns;
pub mod vd;
pub mod vp;

pub use amounts::{format_amount, is_positive_credit, normalize_amount};
pub use case_id::{extract_case_id, CaseIdExtractor};
pub use dates::{format_date, normalize_date};
pub use ipn::{extract_ipn, validate_ipn, IpnExtractor};
pub use name::{extract_name, NameExtractor};
pub use vd::{extract_vd, VdExtractor};
pub use vp::{extract_vp, VpExtractor};

use regex::{Captures, Regex};
use tracing::trace;

use patterns::{OWN_NUMBER_LEAD, PROCEEDING_MARKER};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A value accepted by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Normalized value.
    pub value: String,
    /// Name of the rule that produced it.
    pub rule: &'static str,
    /// Byte range of the matched value in the source text.
    pub position: (usize, usize),
}

/// Outcome of running one rule against a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule produced a value.
    Accept(RuleMatch),
    /// The rule matched but its context disqualifies the whole field.
    Veto { rule: &'static str },
}

/// Acceptance function: turns a pattern match into a value, or rejects it so
/// the next match (and then the next rule) is tried.
pub type AcceptFn = fn(&str, &Captures<'_>) -> Option<String>;

/// Disqualifies a match when a marker token appears near the matched number.
#[derive(Debug, Clone, Copy)]
pub struct ContextExclusion {
    /// Window size in characters on each side of the `num` group.
    pub window: usize,
    /// Marker tokens.
    pub markers: &'static Regex,
}

impl ContextExclusion {
    /// Enforcement-proceeding markers within 10 characters.
    pub fn proceeding_markers() -> Self {
        Self {
            window: 10,
            markers: &PROCEEDING_MARKER,
        }
    }

    /// Whether a marker sits within the window around `start..end`.
    ///
    /// A marker that directly introduces its own number (e.g. "ВП №123")
    /// labels a separate reference and is not counted.
    pub fn excludes(&self, text: &str, start: usize, end: usize) -> bool {
        let lo = text[..start]
            .char_indices()
            .rev()
            .take(self.window)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(start);
        let hi = text[end..]
            .char_indices()
            .nth(self.window)
            .map(|(i, _)| end + i)
            .unwrap_or(text.len());

        self.markers.find_iter(text).any(|m| {
            let in_window = (m.start() < start && m.end() > lo) || (m.start() >= end && m.start() < hi);
            in_window && !OWN_NUMBER_LEAD.is_match(&text[m.end()..])
        })
    }
}

/// One extraction rule.
pub struct Rule {
    /// Rule name, reported in matches and traces.
    pub name: &'static str,
    /// Lower runs first.
    pub priority: u8,
    /// Pattern; the value range is the `num` group when present.
    pub pattern: &'static Regex,
    /// Turns a match into a value.
    pub accept: AcceptFn,
    /// Optional context check applied to the accepted match.
    pub exclusion: Option<ContextExclusion>,
}

impl Rule {
    pub fn new(name: &'static str, priority: u8, pattern: &'static Regex, accept: AcceptFn) -> Self {
        Self {
            name,
            priority,
            pattern,
            accept,
            exclusion: None,
        }
    }

    pub fn with_exclusion(mut self, exclusion: ContextExclusion) -> Self {
        self.exclusion = Some(exclusion);
        self
    }

    /// Run this rule alone. `None` means the rule did not apply.
    pub fn evaluate(&self, text: &str) -> Option<RuleOutcome> {
        for caps in self.pattern.captures_iter(text) {
            let Some(value) = (self.accept)(text, &caps) else {
                continue;
            };

            let span = caps.name("num").or_else(|| caps.get(0))?;
            if let Some(exclusion) = &self.exclusion {
                if exclusion.excludes(text, span.start(), span.end()) {
                    return Some(RuleOutcome::Veto { rule: self.name });
                }
            }

            return Some(RuleOutcome::Accept(RuleMatch {
                value,
                rule: self.name,
                position: (span.start(), span.end()),
            }));
        }
        None
    }
}

/// Ordered rule list for one identifier class.
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table; rules are sorted by priority.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule that applies wins; a veto ends the search with no value.
    pub fn evaluate(&self, text: &str) -> Option<RuleMatch> {
        for rule in &self.rules {
            match rule.evaluate(text) {
                Some(RuleOutcome::Accept(m)) => {
                    trace!("rule {} matched {:?}", rule.name, m.value);
                    return Some(m);
                }
                Some(RuleOutcome::Veto { rule }) => {
                    trace!("rule {} vetoed by context", rule);
                    return None;
                }
                None => {}
            }
        }
        None
    }
}

/// Value of the `num` group, rejected when more digits follow it.
pub(crate) fn standalone_number(text: &str, caps: &Captures<'_>) -> Option<String> {
    let num = caps.name("num")?;
    if followed_by_digit(text, num.end()) {
        return None;
    }
    Some(num.as_str().to_string())
}

pub(crate) fn followed_by_digit(text: &str, pos: usize) -> bool {
    text[pos..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Value of the `num` group, rejected when the number runs on past it: another
/// digit, or a hyphen/slash followed by a digit.
pub(crate) fn complete_number(text: &str, caps: &Captures<'_>) -> Option<String> {
    let num = caps.name("num")?;
    if continues_number(text, num.end()) {
        return None;
    }
    Some(num.as_str().to_string())
}

pub(crate) fn continues_number(text: &str, pos: usize) -> bool {
    let mut chars = text[pos..].chars();
    match (chars.next(), chars.next()) {
        (Some(c), _) if c.is_ascii_digit() => true,
        (Some('-' | '/'), Some(d)) => d.is_ascii_digit(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref ALPHA: Regex = Regex::new(r"A(?P<num>\d+)").unwrap();
        static ref BETA: Regex = Regex::new(r"B(?P<num>\d+)").unwrap();
    }

    fn table() -> RuleTable {
        RuleTable::new(vec![
            Rule::new("beta", 2, &BETA, standalone_number),
            Rule::new("alpha", 1, &ALPHA, standalone_number)
                .with_exclusion(ContextExclusion::proceeding_markers()),
        ])
    }

    #[test]
    fn test_rules_sorted_by_priority() {
        let names: Vec<_> = table().rules().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_first_rule_wins() {
        let m = table().evaluate("B22 A11").unwrap();
        assert_eq!(m.value, "11");
        assert_eq!(m.rule, "alpha");
    }

    #[test]
    fn test_later_rule_used_when_earlier_misses() {
        let m = table().evaluate("B22").unwrap();
        assert_eq!(m.rule, "beta");
    }

    #[test]
    fn test_veto_stops_evaluation() {
        assert_eq!(table().evaluate("A11 ип B22"), None);
    }

    #[test]
    fn test_marker_with_own_number_does_not_veto() {
        let m = table().evaluate("A11 ВП №5").unwrap();
        assert_eq!(m.value, "11");
    }

    #[test]
    fn test_marker_outside_window_ignored() {
        let m = table().evaluate("A11 0123456789 ип").unwrap();
        assert_eq!(m.value, "11");
    }

    #[test]
    fn test_continues_number() {
        assert!(continues_number("12-3", 2));
        assert!(continues_number("12/3", 2));
        assert!(continues_number("123", 2));
        assert!(!continues_number("12-ип", 2));
        assert!(!continues_number("12/", 2));
        assert!(!continues_number("12", 2));
    }

    #[test]
    fn test_marker_before_number() {
        let exclusion = ContextExclusion::proceeding_markers();
        let text = "ип A11";
        assert!(exclusion.excludes(text, 6, 8));
    }
}
