//! Transaction reference and direction extraction.

use regex::Regex;
use tracing::debug;

use super::patterns::{GENERIC_TRANSACTION_ID, GOOGLE_TRANSACTION_ID, UPI_TRANSACTION_ID};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::purchase::TransactionType;

/// Keywords marking money coming in. Checked before [`SENT_KEYWORDS`]
/// because they are the less ambiguous of the two.
pub const RECEIVED_KEYWORDS: &[&str] = &["payment received from", "credited"];

/// Keywords marking money going out.
pub const SENT_KEYWORDS: &[&str] = &[
    "paid to",
    "payment sent",
    "to:",
    "paytm",
    "pay again",
    "paid",
];

/// Transaction id extractor.
///
/// Labeled ids are tried first; the unlabeled fallback accepts the first
/// code-like token even if it turns out to be a merchant code or heading.
pub struct TransactionIdExtractor;

impl TransactionIdExtractor {
    pub fn new() -> Self {
        Self
    }

    fn tiers() -> [&'static Regex; 3] {
        [
            &*UPI_TRANSACTION_ID,
            &*GOOGLE_TRANSACTION_ID,
            &*GENERIC_TRANSACTION_ID,
        ]
    }
}

impl Default for TransactionIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TransactionIdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for (tier, pattern) in Self::tiers().into_iter().enumerate() {
            if let Some(caps) = pattern.captures(text) {
                let Some(full_match) = caps.get(0) else {
                    continue;
                };
                debug!("Transaction id matched by tier {}", tier);
                return Some(
                    ExtractionMatch::new(caps[1].to_string(), tier, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Extract a transaction reference from receipt text.
pub fn parse_transaction_id(text: &str) -> Option<String> {
    TransactionIdExtractor::new().extract(text).map(|m| m.value)
}

/// Guess whether the screenshot shows money sent or received.
pub fn infer_transaction_type(text: &str) -> Option<TransactionType> {
    let lower = text.to_lowercase();
    let mentions_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if mentions_any(RECEIVED_KEYWORDS) {
        Some(TransactionType::Received)
    } else if mentions_any(SENT_KEYWORDS) {
        Some(TransactionType::Sent)
    } else {
        None
    }
}
