//! Purchase data models.
//!
//! Field names serialize in camelCase so the records can be handed to the
//! JavaScript app shell unchanged.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::receipt::{SAMPLE_RECEIPT_TEXT, parse_receipt_text};

/// Merchant placeholder used when only an amount was recognized.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Label shown for purchases without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money paid to someone else.
    Sent,
    /// Money received.
    Received,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse spending category suggested from the merchant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Groceries,
    Entertainment,
    Rent,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Food,
        Self::Transport,
        Self::Groceries,
        Self::Entertainment,
        Self::Rent,
        Self::Utilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Groceries => "Groceries",
            Self::Entertainment => "Entertainment",
            Self::Rent => "Rent",
            Self::Utilities => "Utilities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Structured fields recognized in one screenshot.
///
/// Produced fresh by every parse and never mutated by the parser; user edits
/// go through [`PurchaseDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPurchase {
    /// Counterparty name, or [`UNKNOWN_MERCHANT`].
    pub merchant: String,

    /// Payment amount; zero when only the merchant was recognized.
    pub amount: Decimal,

    /// Date/time text as it appeared on screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Transaction reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,

    /// Category derived from the merchant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_category: Option<Category>,
}

/// Raw OCR text together with whatever could be parsed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    pub raw_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedPurchase>,
}

impl OcrResult {
    /// Parse recognized text.
    pub fn from_text(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let parsed = parse_receipt_text(&raw_text);
        Self { raw_text, parsed }
    }

    /// Result for the built-in sample screenshot, used when no OCR engine is
    /// available.
    pub fn sample() -> Self {
        Self::from_text(SAMPLE_RECEIPT_TEXT)
    }
}

/// A saved purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,

    pub merchant: String,

    pub amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// ISO or human-friendly date text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl Purchase {
    /// Category label, falling back to [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Editable form of a parsed purchase.
///
/// Edited fields start pre-filled from the parse; empty edits fall back to
/// the parsed values when the draft is turned into a [`Purchase`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseDraft {
    parsed: Option<ParsedPurchase>,
    merchant: String,
    amount: String,
    date: String,
    category: String,
    currency: Option<String>,
    source_image_uri: Option<String>,
}

impl PurchaseDraft {
    /// Pre-fill editable fields from a parse result.
    pub fn from_parsed(parsed: Option<ParsedPurchase>) -> Self {
        let (merchant, amount, date) = match &parsed {
            Some(p) => (
                p.merchant.clone(),
                if p.amount.is_zero() {
                    String::new()
                } else {
                    p.amount.to_string()
                },
                p.date.clone().unwrap_or_default(),
            ),
            None => Default::default(),
        };

        Self {
            parsed,
            merchant,
            amount,
            date,
            ..Default::default()
        }
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Category shown as a hint while the category field is empty.
    pub fn category_hint(&self) -> Option<Category> {
        self.parsed.as_ref().and_then(|p| p.suggested_category)
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_source_image(mut self, uri: impl Into<String>) -> Self {
        self.source_image_uri = Some(uri.into());
        self
    }

    /// Resolve edits against the parse and assign a fresh id.
    pub fn into_purchase(self) -> Result<Purchase> {
        let parsed = self.parsed.ok_or(LedgerError::NothingParsed)?;

        let merchant = non_empty(&self.merchant)
            .or_else(|| non_empty(&parsed.merchant))
            .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());

        let amount = match non_empty(&self.amount) {
            Some(text) => parse_edited_amount(&text)?,
            None => parsed.amount,
        };

        let date = non_empty(&self.date).or(parsed.date);

        let category = non_empty(&self.category)
            .or_else(|| parsed.suggested_category.map(|c| c.to_string()));

        Ok(Purchase {
            id: Uuid::new_v4().to_string(),
            merchant,
            amount,
            currency: self.currency,
            date,
            category,
            source_image_uri: self.source_image_uri,
            transaction_id: parsed.transaction_id,
            transaction_type: parsed.transaction_type,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_edited_amount(text: &str) -> Result<Decimal> {
    Decimal::from_str(text)
        .ok()
        .filter(|amount| !amount.is_sign_negative())
        .ok_or_else(|| LedgerError::InvalidAmount(text.to_string()).into())
}
