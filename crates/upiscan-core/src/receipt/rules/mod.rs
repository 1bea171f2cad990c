//! Rule-based field extractors for payment-app screenshots.
//!
//! Every extractor is a cascade of tiers tried in a fixed order; the first
//! tier that produces a value wins and later tiers are never consulted.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod merchant;
pub mod patterns;
pub mod transaction;

pub use amounts::{AmountExtractor, parse_amount, parse_amount_token};
pub use category::{CATEGORY_KEYWORDS, infer_category};
pub use dates::{DateExtractor, parse_date};
pub use merchant::{MerchantExtractor, extract_merchant};
pub use transaction::{
    RECEIVED_KEYWORDS, SENT_KEYWORDS, TransactionIdExtractor, infer_transaction_type,
    parse_transaction_id,
};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every candidate from the tier that fired.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found by one tier of an extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Zero-based index of the tier that produced the value.
    pub tier: usize,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, tier: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            tier,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Whether a fallback tier produced this value.
    pub fn is_fallback(&self) -> bool {
        self.tier > 0
    }
}
