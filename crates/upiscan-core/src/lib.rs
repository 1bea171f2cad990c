//! Core library for payment-screenshot expense tracking.
//!
//! This crate provides:
//! - Receipt text parsing for GPay / PhonePe / Paytm style OCR output
//!   (merchant, amount, date, transaction id and type)
//! - Merchant-based spending category suggestions
//! - Purchase records, user-edit overlays and ledger aggregation
//! - Request payloads for the spending advice service

pub mod advice;
pub mod error;
pub mod models;
pub mod receipt;

pub use advice::{AdviceMessage, AdviceRequest, AdviceResponse, LatestPurchase};
pub use error::{Result, UpiscanError};
pub use models::ledger::{AdviceHistoryEntry, PurchaseLedger};
pub use models::purchase::{
    Category, OcrResult, ParsedPurchase, Purchase, PurchaseDraft, TransactionType,
};
pub use receipt::{ExtractionResult, ReceiptParser, ReceiptTextParser, parse_receipt_text};
