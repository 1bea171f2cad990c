//! Amount extraction for payment screenshots.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace};

use super::patterns::{BARE_AMOUNT, RUPEE_AMOUNT};
use super::{ExtractionMatch, FieldExtractor};

/// Tier 0: rupee-marked amounts. Tier 1: any grouped or plain number.
const TIER_RUPEE: usize = 0;
const TIER_BARE: usize = 1;

/// Amount field extractor.
///
/// The displayed payment total is usually the largest figure on the screen,
/// so `extract` returns the maximum candidate of the first tier that found
/// anything.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan(&self, pattern: &Regex, tier: usize, text: &str) -> Vec<ExtractionMatch<Decimal>> {
        let mut results = Vec::new();

        for caps in pattern.captures_iter(text) {
            let token = &caps[1];
            match parse_amount_token(token) {
                Some(amount) => {
                    let full_match = &caps[0];
                    let (start, end) = caps
                        .get(0)
                        .map(|m| (m.start(), m.end()))
                        .unwrap_or_default();
                    results.push(
                        ExtractionMatch::new(amount, tier, full_match).with_position(start, end),
                    );
                }
                None => trace!("Discarding unparseable amount token {:?}", token),
            }
        }

        results
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text)
            .into_iter()
            .max_by(|a, b| a.value.cmp(&b.value))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let marked = self.scan(&RUPEE_AMOUNT, TIER_RUPEE, text);
        if !marked.is_empty() {
            debug!("Found {} rupee-marked amounts", marked.len());
            return marked;
        }

        let bare = self.scan(&BARE_AMOUNT, TIER_BARE, text);
        if !bare.is_empty() {
            debug!("No rupee-marked amount, falling back to {} bare numbers", bare.len());
        }
        bare
    }
}

/// Extract the most likely payment amount from receipt text.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}

/// Parse one numeric token such as "1,032" or "299.00", dropping thousands
/// separators. Returns `None` for anything `Decimal` rejects (including
/// overflow).
pub fn parse_amount_token(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_currency_marked_amount_beats_larger_bare_number() {
        assert_eq!(parse_amount("₹1,032 paid, ref 9999999999"), Some(dec("1032")));
    }

    #[test]
    fn test_max_of_currency_marked_amounts() {
        let text = "Cashback ₹25\nPaid ₹1,250.50\nFee ₹ 2";
        assert_eq!(parse_amount(text), Some(dec("1250.50")));
    }

    #[test]
    fn test_bare_fallback_takes_maximum() {
        assert_eq!(parse_amount("total 1,250.50 items 3"), Some(dec("1250.50")));
    }

    #[test]
    fn test_plain_rupee_amount_without_grouping() {
        assert_eq!(parse_amount("₹1032"), Some(dec("1032")));
        assert_eq!(parse_amount("₹ 45.5"), Some(dec("45.5")));
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("no digits at all"), None);
    }

    #[test]
    fn test_overflowing_tokens_are_discarded() {
        let text = "ref 99999999999999999999999999999999999 amount 12";
        assert_eq!(parse_amount(text), Some(dec("12")));
    }

    #[test]
    fn test_tiers_are_reported() {
        let extractor = AmountExtractor::new();

        let marked = extractor.extract("₹299.00").unwrap();
        assert_eq!(marked.tier, TIER_RUPEE);
        assert_eq!(marked.source, "₹299.00");
        assert!(!marked.is_fallback());

        let bare = extractor.extract("Amount 299").unwrap();
        assert_eq!(bare.tier, TIER_BARE);
        assert!(bare.is_fallback());
    }

    #[test]
    fn test_extract_all_only_returns_firing_tier() {
        let extractor = AmountExtractor::new();
        let results = extractor.extract_all("₹10 and ₹20 but also 5000");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|m| m.tier == TIER_RUPEE));
    }

    #[test]
    fn test_parse_amount_token() {
        assert_eq!(parse_amount_token("1,00,000"), Some(dec("100000")));
        assert_eq!(parse_amount_token("12.5"), Some(dec("12.5")));
        assert_eq!(parse_amount_token(""), None);
    }
}
