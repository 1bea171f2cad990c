//! WASM bindings for payment-screenshot receipt parsing.
//!
//! The app shell runs OCR itself and hands the recognized text to these
//! functions; parsing happens in-process with no network access.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use upiscan_core::models::purchase::{Category, ParsedPurchase};
use upiscan_core::receipt::rules;
use upiscan_core::{ReceiptParser as _, ReceiptTextParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn purchase_to_js(purchase: Option<&ParsedPurchase>) -> Result<JsValue, JsValue> {
    match purchase {
        Some(p) => to_js(p),
        None => Ok(JsValue::NULL),
    }
}

/// Parse OCR text into a purchase object, or `null` when neither an amount
/// nor a merchant could be found.
#[wasm_bindgen]
pub fn parse_receipt_text(text: &str) -> Result<JsValue, JsValue> {
    purchase_to_js(upiscan_core::parse_receipt_text(text).as_ref())
}

/// Largest amount in the text, preferring ₹-marked numbers.
#[wasm_bindgen]
pub fn parse_amount(text: &str) -> Option<f64> {
    rules::parse_amount(text).and_then(|d| d.to_f64())
}

/// Date text as it appears on screen.
#[wasm_bindgen]
pub fn parse_date(text: &str) -> Option<String> {
    rules::parse_date(text)
}

/// Suggested category name for a merchant.
#[wasm_bindgen]
pub fn infer_category(merchant: &str) -> Option<String> {
    rules::infer_category(merchant).map(|c| c.to_string())
}

/// Names of every category the parser can suggest, in lookup order.
#[wasm_bindgen]
pub fn categories() -> js_sys::Array {
    Category::ALL
        .iter()
        .map(|c| JsValue::from_str(c.as_str()))
        .collect()
}

/// Receipt parser class for browser use.
#[wasm_bindgen]
pub struct ReceiptParser {
    parser: ReceiptTextParser,
}

#[wasm_bindgen]
impl ReceiptParser {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: ReceiptTextParser::new(),
        }
    }

    /// Turn low-confidence notes in `parse_with_metadata` on or off.
    #[wasm_bindgen]
    pub fn set_emit_warnings(&mut self, emit: bool) {
        self.parser = ReceiptTextParser::new().with_warnings(emit);
    }

    /// Parse text into a purchase object or `null`.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        purchase_to_js(result.purchase.as_ref())
    }

    /// Parse text and return `{ purchase, rawText, warnings, processingTimeMs }`.
    #[wasm_bindgen]
    pub fn parse_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
        result
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
