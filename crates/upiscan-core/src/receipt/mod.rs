//! Receipt text parsing for payment-app screenshots.

pub mod normalize;
mod parser;
pub mod rules;

pub use normalize::{join_lines, normalize_spaces, split_lines};
pub use parser::{ExtractionResult, ReceiptTextParser, parse_receipt_text};

/// Text returned when no OCR engine is available, shaped like a
/// "payment received" screen.
pub const SAMPLE_RECEIPT_TEXT: &str =
    "PAYMENT RECEIVED\nMerchant: Example Store\nAmount: ₹299.00\nDate: 2025-08-10";

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse receipt text. Never fails; an empty result means nothing usable
    /// was found.
    fn parse(&self, text: &str) -> ExtractionResult;
}
