//! Common regex patterns for payment-screenshot extraction.
//!
//! Digits are matched with `[0-9]` rather than `\d`, which would also accept
//! non-ASCII digits that `Decimal` cannot parse.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Rupee-marked amounts: ₹1,032 / ₹ 299.00 / ₹45
    pub static ref RUPEE_AMOUNT: Regex = Regex::new(
        r"₹\s?([0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]{1,2})?|[0-9]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Unmarked amounts: grouped (1,250.50) or plain (42, 3.5)
    pub static ref BARE_AMOUNT: Regex = Regex::new(
        r"([0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]{1,2})?|[0-9]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // "12 Oct 2025, 1:47 pm", "29 Sept 2025", "4 October 2025 18:05"
    pub static ref DATE_LONG: Regex = Regex::new(
        r"(?i)([0-9]{1,2}\s+[a-z]{3,9}\s+[0-9]{4}(?:,?\s*[0-9]{1,2}:[0-9]{2}(?:\s*(?:am|pm))?)?)"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"([0-9]{4}-[0-9]{2}-[0-9]{2})"
    ).unwrap();

    // Labeled transaction references
    pub static ref UPI_TRANSACTION_ID: Regex = Regex::new(
        r"(?i)UPI transaction ID\s*[:\-]?\s*([A-Za-z0-9\-_]+)"
    ).unwrap();

    pub static ref GOOGLE_TRANSACTION_ID: Regex = Regex::new(
        r"(?i)Google transaction ID\s*[:\-]?\s*([A-Za-z0-9\-_]+)"
    ).unwrap();

    // Unlabeled reference codes such as CICAgOCx7fD2Aw
    pub static ref GENERIC_TRANSACTION_ID: Regex = Regex::new(
        r"([A-Z0-9]{4,}[A-Za-z0-9_\-]{3,})"
    ).unwrap();

    // Counterparty lines. A plain prefix match: "Total ₹500" reads as a
    // "To" line capturing "tal ₹500".
    pub static ref TO_LINE: Regex = Regex::new(
        r"(?i)^to[:\-]?\s*(.+)$"
    ).unwrap();

    pub static ref FROM_LINE: Regex = Regex::new(
        r"(?i)^from[:\-]?\s*(.+)$"
    ).unwrap();

    pub static ref MERCHANT_LABEL: Regex = Regex::new(
        r"(?i)merchant[:\-]?\s*(.+)$"
    ).unwrap();

    // All-caps header line, e.g. "SHREE GANESH STORES"
    pub static ref UPPERCASE_RUN: Regex = Regex::new(
        r"[A-Z\s]{4,}"
    ).unwrap();

    // Account / phone annotation after a payee name: "John Doe (9999999999)"
    pub static ref PAREN_ANNOTATION: Regex = Regex::new(
        r"\(.*\)"
    ).unwrap();
}
