//! Receipt parser that runs every field extractor and assembles the result.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use super::normalize::{join_lines, split_lines};
use super::rules::{
    AmountExtractor, DateExtractor, ExtractionMatch, FieldExtractor, MerchantExtractor,
    TransactionIdExtractor, infer_category, infer_transaction_type,
};
use super::ReceiptParser;
use crate::models::purchase::{Category, ParsedPurchase, TransactionType, UNKNOWN_MERCHANT};

/// Merchant tier that guesses from an all-caps line.
const MERCHANT_HEADER_TIER: usize = 3;

/// Transaction id tier that accepts any code-like token.
const TRANSACTION_ID_GENERIC_TIER: usize = 2;

/// Elapsed-time probe. `std::time::Instant` panics on wasm32-unknown-unknown,
/// so timing reads as zero there.
struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        #[cfg(not(target_arch = "wasm32"))]
        return u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);

        #[cfg(target_arch = "wasm32")]
        0
    }
}

/// Result of receipt extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted purchase, absent when neither amount nor merchant was found.
    pub purchase: Option<ParsedPurchase>,
    /// Raw OCR text.
    pub raw_text: String,
    /// Notes about guessed or defaulted fields.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Everything the extractors found, before defaults are applied.
#[derive(Debug, Default)]
struct ExtractedFields {
    amount: Option<ExtractionMatch<Decimal>>,
    merchant: Option<ExtractionMatch<String>>,
    date: Option<String>,
    transaction_id: Option<ExtractionMatch<String>>,
    transaction_type: Option<TransactionType>,
    suggested_category: Option<Category>,
}

impl ExtractedFields {
    fn extract(raw_text: &str) -> Self {
        let lines = split_lines(raw_text);
        let joined = join_lines(&lines);

        // A zero amount counts as not found.
        let amount = AmountExtractor::new()
            .extract(&joined)
            .filter(|m| !m.value.is_zero());
        let merchant = MerchantExtractor::new().extract_from_lines(&lines);
        let date = DateExtractor::new().extract(&joined).map(|m| m.value);
        let transaction_id = TransactionIdExtractor::new().extract(&joined);
        let transaction_type = infer_transaction_type(&joined);
        let suggested_category =
            infer_category(merchant.as_ref().map(|m| m.value.as_str()).unwrap_or(""));

        Self {
            amount,
            merchant,
            date,
            transaction_id,
            transaction_type,
            suggested_category,
        }
    }

    /// Amount and merchant gate emission; a single one of them is enough and
    /// the other is filled with its placeholder. This tolerates sparse,
    /// low-confidence parses on purpose: the user corrects them while editing.
    fn apply_defaults(self) -> Option<ParsedPurchase> {
        if self.amount.is_none() && self.merchant.is_none() {
            return None;
        }

        Some(ParsedPurchase {
            merchant: self
                .merchant
                .map(|m| m.value)
                .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
            amount: self.amount.map(|m| m.value).unwrap_or(Decimal::ZERO),
            date: self.date,
            transaction_id: self.transaction_id.map(|m| m.value),
            transaction_type: self.transaction_type,
            suggested_category: self.suggested_category,
        })
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.amount.is_none() && self.merchant.is_none() {
            warnings.push("Could not extract amount or merchant".to_string());
            return warnings;
        }

        match &self.amount {
            None => warnings.push("Could not extract amount, defaulted to 0".to_string()),
            Some(m) if m.is_fallback() => warnings.push(format!(
                "No ₹-marked amount; using the largest number {}",
                m.value
            )),
            Some(_) => {}
        }

        match &self.merchant {
            None => warnings.push(format!(
                "Could not extract merchant, defaulted to {UNKNOWN_MERCHANT}"
            )),
            Some(m) if m.tier == MERCHANT_HEADER_TIER => warnings.push(format!(
                "Merchant guessed from header line {:?}",
                m.source
            )),
            Some(_) => {}
        }

        if self.date.is_none() {
            warnings.push("Could not extract date".to_string());
        }

        if let Some(m) = &self.transaction_id {
            if m.tier == TRANSACTION_ID_GENERIC_TIER {
                warnings.push(format!("Transaction id {:?} is an unlabeled guess", m.value));
            }
        }

        warnings
    }
}

/// Rule-based receipt parser.
pub struct ReceiptTextParser {
    /// Whether to report guessed and defaulted fields.
    emit_warnings: bool,
}

impl ReceiptTextParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            emit_warnings: true,
        }
    }

    /// Set warning reporting.
    pub fn with_warnings(mut self, emit: bool) -> Self {
        self.emit_warnings = emit;
        self
    }
}

impl Default for ReceiptTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for ReceiptTextParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let stopwatch = Stopwatch::start();

        info!("Parsing receipt from {} characters of text", text.len());

        let fields = ExtractedFields::extract(text);
        let warnings = if self.emit_warnings {
            fields.warnings()
        } else {
            Vec::new()
        };
        let purchase = fields.apply_defaults();

        match &purchase {
            Some(p) => debug!("Extracted {} for {}", p.amount, p.merchant),
            None => debug!("No purchase data found"),
        }

        ExtractionResult {
            purchase,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: stopwatch.elapsed_ms(),
        }
    }
}

/// Parse raw OCR text into a purchase, or `None` if neither an amount nor a
/// merchant could be found.
pub fn parse_receipt_text(raw_text: &str) -> Option<ParsedPurchase> {
    ExtractedFields::extract(raw_text).apply_defaults()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const GPAY_PAID: &str = "Paid to
Zomato Ltd
₹349.00
Completed
4 Oct 2025, 6:43 pm
HDFC Bank 1234
UPI transaction ID
527812345678
To: ZOMATO LTD (zomato@hdfcbank)
From: JOHN DOE (HDFC Bank)
Google transaction ID
CICAgOCx7fD2Aw";

    const PHONEPE_RECEIVED: &str = "Received from
RAVI KUMAR
₹1,500
Credited to
State Bank of India
Transaction ID
T2510041843123456789
12 Oct 2025, 1:47 PM";

    #[test]
    fn test_parse_gpay_payment() {
        let parsed = parse_receipt_text(GPAY_PAID).unwrap();
        assert_eq!(
            parsed,
            ParsedPurchase {
                merchant: "ZOMATO LTD".to_string(),
                amount: dec("349.00"),
                date: Some("4 Oct 2025, 6:43 pm".to_string()),
                transaction_id: Some("527812345678".to_string()),
                transaction_type: Some(TransactionType::Sent),
                suggested_category: Some(Category::Food),
            }
        );
    }

    #[test]
    fn test_parse_phonepe_received() {
        let parsed = parse_receipt_text(PHONEPE_RECEIVED).unwrap();
        assert_eq!(parsed.merchant, "RAVI KUMAR");
        assert_eq!(parsed.amount, dec("1500"));
        assert_eq!(parsed.date.as_deref(), Some("12 Oct 2025, 1:47 PM"));
        assert_eq!(parsed.transaction_id.as_deref(), Some("T2510041843123456789"));
        assert_eq!(parsed.transaction_type, Some(TransactionType::Received));
        assert_eq!(parsed.suggested_category, None);
    }

    #[test]
    fn test_empty_text_is_absent() {
        assert_eq!(parse_receipt_text(""), None);
        assert_eq!(parse_receipt_text("  \n\n "), None);
    }

    #[test]
    fn test_amount_alone_emits_with_unknown_merchant() {
        let parsed = parse_receipt_text("random text 42").unwrap();
        assert_eq!(parsed.merchant, UNKNOWN_MERCHANT);
        assert_eq!(parsed.amount, dec("42"));
        assert_eq!(parsed.suggested_category, None);
    }

    #[test]
    fn test_zero_amount_alone_is_absent() {
        assert_eq!(parse_receipt_text("₹0"), None);
        assert_eq!(parse_receipt_text("Amount ₹0.00"), None);
    }

    #[test]
    fn test_zero_amount_with_merchant_emits() {
        let parsed = parse_receipt_text("To: Ravi\n₹0").unwrap();
        assert_eq!(parsed.merchant, "Ravi");
        assert_eq!(parsed.amount, Decimal::ZERO);

        let result = ReceiptTextParser::new().parse("To: Ravi\n₹0");
        assert!(result
            .warnings
            .contains(&"Could not extract amount, defaulted to 0".to_string()));
    }

    #[test]
    fn test_merchant_alone_emits_with_zero_amount() {
        let parsed = parse_receipt_text("To: Ravi").unwrap();
        assert_eq!(parsed.merchant, "Ravi");
        assert_eq!(parsed.amount, Decimal::ZERO);
        assert_eq!(parsed.transaction_type, Some(TransactionType::Sent));
    }

    #[test]
    fn test_no_amount_no_merchant_is_absent() {
        // Date and transaction type alone never gate emission.
        assert_eq!(parse_receipt_text("paid on four oct"), None);
    }

    #[test]
    fn test_sample_text() {
        let parsed = parse_receipt_text(crate::receipt::SAMPLE_RECEIPT_TEXT).unwrap();
        assert_eq!(parsed.merchant, "Example Store");
        assert_eq!(parsed.amount, dec("299.00"));
        assert_eq!(parsed.date.as_deref(), Some("2025-08-10"));
        assert_eq!(parsed.transaction_id.as_deref(), Some("PAYMENT"));
        assert_eq!(parsed.transaction_type, None);
        assert_eq!(parsed.suggested_category, None);
    }

    #[test]
    fn test_parser_result_and_warnings() {
        let result = ReceiptTextParser::new().parse("SHREE GANESH STORES\nBill amount 1,250.50");
        let purchase = result.purchase.clone().unwrap();
        assert_eq!(purchase.merchant, "SHREE GANESH STORES");
        assert_eq!(purchase.amount, dec("1250.50"));
        assert_eq!(result.raw_text, "SHREE GANESH STORES\nBill amount 1,250.50");
        assert_eq!(
            result.warnings,
            vec![
                "No ₹-marked amount; using the largest number 1250.50".to_string(),
                "Merchant guessed from header line \"SHREE GANESH STORES\"".to_string(),
                "Could not extract date".to_string(),
            ]
        );
    }

    #[test]
    fn test_parser_warnings_when_nothing_found() {
        let result = ReceiptTextParser::new().parse("");
        assert_eq!(result.purchase, None);
        assert_eq!(result.warnings, vec!["Could not extract amount or merchant".to_string()]);
    }

    #[test]
    fn test_stopwatch_reports_milliseconds() {
        let stopwatch = Stopwatch::start();
        assert!(stopwatch.elapsed_ms() < 60_000);
    }

    #[test]
    fn test_parser_without_warnings() {
        let result = ReceiptTextParser::new().with_warnings(false).parse("random text 42");
        assert!(result.purchase.is_some());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_receipt_text(GPAY_PAID), parse_receipt_text(GPAY_PAID));
    }
}
