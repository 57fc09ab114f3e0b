//! IPN / RNOKPP (Ukrainian individual tax number) extraction and validation.

use super::patterns::DIGIT_RUN;
use super::{FieldExtractor, RuleMatch};

/// Control-digit weights for the first nine digits.
const IPN_WEIGHTS: [i32; 9] = [-1, 5, 7, 9, 4, 6, 10, 5, 7];

/// IPN field extractor.
///
/// Candidates are the maximal runs of exactly ten digits, taken left to
/// right; the first one with a valid control digit wins.
pub struct IpnExtractor;

impl IpnExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Every ten-digit run in order of appearance, valid or not.
    pub fn candidates<'t>(&self, text: &'t str) -> impl Iterator<Item = regex::Match<'t>> + 't {
        DIGIT_RUN.find_iter(text).filter(|m| m.as_str().len() == 10)
    }
}

impl Default for IpnExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IpnExtractor {
    type Output = RuleMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.candidates(text)
            .find(|m| validate_ipn(m.as_str()))
            .map(|m| RuleMatch {
                value: m.as_str().to_string(),
                rule: "ipn_checksum",
                position: (m.start(), m.end()),
            })
    }
}

/// Extract the first checksum-valid IPN from text.
pub fn extract_ipn(text: &str) -> Option<String> {
    IpnExtractor::new().extract(text).map(|m| m.value)
}

/// Validate an IPN using the control-digit algorithm.
///
/// The input must be exactly ten ASCII digits; anything else is invalid.
/// Weights: -1, 5, 7, 9, 4, 6, 10, 5, 7. The control digit is
/// `(sum mod 11) mod 10`, with the modulo taken as a non-negative remainder.
pub fn validate_ipn(ipn: &str) -> bool {
    if ipn.len() != 10 || !ipn.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<i32> = ipn.bytes().map(|b| i32::from(b - b'0')).collect();

    let sum: i32 = digits
        .iter()
        .take(9)
        .zip(IPN_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();

    let checksum = sum.rem_euclid(11) % 10;

    checksum == digits[9]
}
