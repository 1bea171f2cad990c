//! Merchant (counterparty) extraction.
//!
//! Merchant names are line-scoped, so this extractor works on the split line
//! list rather than the joined text.

use tracing::debug;

use super::patterns::{FROM_LINE, MERCHANT_LABEL, PAREN_ANNOTATION, TO_LINE, UPPERCASE_RUN};
use super::{ExtractionMatch, FieldExtractor};
use crate::receipt::normalize::{normalize_spaces, split_lines};

/// A line rule returns `Some` when the line matches, carrying the cleaned
/// capture (which may be empty).
type LineRule = fn(&str) -> Option<String>;

/// Maximum word count of an all-caps header line.
const MAX_HEADER_WORDS: usize = 4;

/// Merchant field extractor.
///
/// Tiers, in order: `To` line, `From` line, `Merchant` label, all-caps header
/// line. Within a tier only the first matching line is considered; if its
/// cleaned capture is empty the whole tier fails and the next one runs.
pub struct MerchantExtractor;

impl MerchantExtractor {
    pub fn new() -> Self {
        Self
    }

    fn tiers() -> [LineRule; 4] {
        [to_line, from_line, merchant_label, uppercase_header]
    }

    /// Extract the merchant from pre-split lines.
    pub fn extract_from_lines(&self, lines: &[String]) -> Option<ExtractionMatch<String>> {
        for (tier, rule) in Self::tiers().into_iter().enumerate() {
            let Some((line, name)) = lines
                .iter()
                .find_map(|line| rule(line).map(|name| (line, name)))
            else {
                continue;
            };

            if name.is_empty() {
                debug!("Merchant tier {} matched {:?} but captured nothing", tier, line);
                continue;
            }

            debug!("Merchant {:?} found by tier {}", name, tier);
            return Some(ExtractionMatch::new(name, tier, line.as_str()));
        }
        None
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MerchantExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_from_lines(&split_lines(text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Extract the merchant name from receipt lines.
pub fn extract_merchant(lines: &[String]) -> Option<String> {
    MerchantExtractor::new()
        .extract_from_lines(lines)
        .map(|m| m.value)
}

fn to_line(line: &str) -> Option<String> {
    TO_LINE
        .captures(line)
        .map(|caps| strip_annotation(&caps[1]))
}

fn from_line(line: &str) -> Option<String> {
    FROM_LINE
        .captures(line)
        .map(|caps| strip_annotation(&caps[1]))
}

fn merchant_label(line: &str) -> Option<String> {
    MERCHANT_LABEL
        .captures(line)
        .map(|caps| normalize_spaces(&caps[1]))
}

fn uppercase_header(line: &str) -> Option<String> {
    let is_header = line.chars().count() > 3
        && UPPERCASE_RUN.is_match(line)
        && line.split_whitespace().count() <= MAX_HEADER_WORDS;

    is_header.then(|| normalize_spaces(line))
}

/// "John Doe (9999999999)" -> "John Doe"
fn strip_annotation(name: &str) -> String {
    normalize_spaces(&PAREN_ANNOTATION.replace(name, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn tier_of(raw: &[&str]) -> Option<(String, usize)> {
        MerchantExtractor::new()
            .extract_from_lines(&lines(raw))
            .map(|m| (m.value, m.tier))
    }

    #[test]
    fn test_to_line_strips_annotation() {
        assert_eq!(
            extract_merchant(&lines(&["To: John Doe (9999999999)"])),
            Some("John Doe".to_string())
        );
    }

    #[test]
    fn test_to_line_variants() {
        assert_eq!(tier_of(&["to-Ravi  Kumar"]), Some(("Ravi Kumar".to_string(), 0)));
        assert_eq!(tier_of(&["TO SWIGGY"]), Some(("SWIGGY".to_string(), 0)));
        // A separator after a space stays in the capture.
        assert_eq!(tier_of(&["to - Ravi"]), Some(("- Ravi".to_string(), 0)));
    }

    #[test]
    fn test_to_prefix_outranks_merchant_label() {
        assert_eq!(
            tier_of(&["Total ₹500", "Merchant: Foo"]),
            Some(("tal ₹500".to_string(), 0))
        );
        assert_eq!(
            tier_of(&["Today 4 Oct", "Merchant: Foo"]),
            Some(("day 4 Oct".to_string(), 0))
        );
    }

    #[test]
    fn test_bare_to_line_is_the_first_match() {
        assert_eq!(
            tier_of(&["To:", "To: Bar"]),
            Some((":".to_string(), 0))
        );
    }

    #[test]
    fn test_to_wins_over_earlier_from() {
        assert_eq!(
            tier_of(&["From: Me (XXXX1234)", "To: Zomato Ltd"]),
            Some(("Zomato Ltd".to_string(), 0))
        );
    }

    #[test]
    fn test_empty_capture_falls_through_to_next_tier() {
        // Only the first To line is considered; its capture is empty.
        assert_eq!(
            tier_of(&["To (9999999999)", "To: Real Name", "From: Sender"]),
            Some(("Sender".to_string(), 1))
        );
    }

    #[test]
    fn test_merchant_label_anywhere_in_line() {
        assert_eq!(
            tier_of(&["PAYMENT RECEIVED", "Merchant: Example Store"]),
            Some(("Example Store".to_string(), 2))
        );
        assert_eq!(
            tier_of(&["Verified merchant: Big Bazaar (Koramangala)"]),
            Some(("Big Bazaar (Koramangala)".to_string(), 2))
        );
        assert_eq!(
            tier_of(&["Merchant -  Foo"]),
            Some(("- Foo".to_string(), 2))
        );
    }

    #[test]
    fn test_uppercase_header_fallback() {
        assert_eq!(
            tier_of(&["₹1,032", "SHREE GANESH STORES", "Completed"]),
            Some(("SHREE GANESH STORES".to_string(), 3))
        );
    }

    #[test]
    fn test_uppercase_header_rejects_long_lines() {
        assert_eq!(tier_of(&["THIS LINE HAS FAR TOO MANY WORDS"]), None);
        assert_eq!(tier_of(&["ABC"]), None);
        assert_eq!(tier_of(&["lower case only"]), None);
    }

    #[test]
    fn test_no_lines() {
        assert_eq!(extract_merchant(&[]), None);
    }

    #[test]
    fn test_extract_from_raw_text() {
        let m = MerchantExtractor::new()
            .extract("\n  Paid to\nTo: Dominos Pizza (merchant)\n")
            .unwrap();
        assert_eq!(m.value, "Dominos Pizza");
        assert_eq!(m.source, "To: Dominos Pizza (merchant)");
    }
}
