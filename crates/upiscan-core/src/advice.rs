//! Request/response payloads for the spending advice service.
//!
//! Only the payloads live here; sending them is up to the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdviceError, Result};
use crate::models::purchase::Purchase;

/// History entries embedded in the prompt.
pub const PROMPT_HISTORY_LIMIT: usize = 30;

/// Shown when the service answered without a completion.
pub const NO_COMPLETION_ADVICE: &str = "Could not generate advice.";

/// Shown when the service could not be reached or answered garbage.
pub const FAILED_ADVICE: &str = "Failed to generate advice. Try again later.";

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceMessage {
    pub role: String,
    pub content: String,
}

/// The purchase the user just saved, as described to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPurchase {
    pub merchant: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl From<&Purchase> for LatestPurchase {
    fn from(p: &Purchase) -> Self {
        Self {
            merchant: p.merchant.clone(),
            amount: p.amount,
            date: p.date.clone(),
        }
    }
}

/// Chat-style request body: `{ "messages": [{ "role": "user", ... }] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub messages: Vec<AdviceMessage>,
}

impl AdviceRequest {
    /// Build a request from purchase history (newest first) and the latest
    /// purchase, embedding at most [`PROMPT_HISTORY_LIMIT`] history entries.
    pub fn build<H: Serialize>(history: &[H], latest: &LatestPurchase) -> Result<Self> {
        Self::build_with_limit(history, latest, PROMPT_HISTORY_LIMIT)
    }

    pub fn build_with_limit<H: Serialize>(
        history: &[H],
        latest: &LatestPurchase,
        limit: usize,
    ) -> Result<Self> {
        let end = limit.min(history.len());
        let history_json = serde_json::to_string(&history[..end])
            .map_err(|e| AdviceError::Prompt(e.to_string()))?;
        let latest_json =
            serde_json::to_string(latest).map_err(|e| AdviceError::Prompt(e.to_string()))?;

        let prompt = format!(
            "You are a helpful personal finance assistant. \
             The user has purchase history: {history_json}. \
             The latest purchase is: {latest_json}. \
             Provide 3 concise pieces of advice to help the user manage spend \
             and suggest a category for the latest purchase."
        );

        Ok(Self {
            messages: vec![AdviceMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        })
    }

    /// The user prompt.
    pub fn prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Response body of the advice service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    #[serde(default)]
    pub completion: Option<String>,
}

impl AdviceResponse {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| AdviceError::Response(e.to_string()).into())
    }

    /// Advice text, or [`NO_COMPLETION_ADVICE`] if the service sent none.
    pub fn advice_text(&self) -> &str {
        self.completion
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(NO_COMPLETION_ADVICE)
    }

    /// Advice text for a raw response body, degrading to [`FAILED_ADVICE`]
    /// when the body cannot be read.
    pub fn advice_for_body(body: &str) -> String {
        match Self::from_json(body) {
            Ok(response) => response.advice_text().to_string(),
            Err(e) => {
                tracing::warn!("Advice response unreadable: {}", e);
                FAILED_ADVICE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ledger::AdviceHistoryEntry;
    use std::str::FromStr;

    fn entry(i: usize) -> AdviceHistoryEntry {
        AdviceHistoryEntry {
            merchant: format!("Shop {i}"),
            amount: Decimal::from(i as u64),
            category: "Food".to_string(),
            date: None,
        }
    }

    fn latest() -> LatestPurchase {
        LatestPurchase {
            merchant: "Zomato".to_string(),
            amount: Decimal::from_str("349.5").unwrap(),
            date: Some("4 Oct 2025".to_string()),
        }
    }

    #[test]
    fn test_request_shape() {
        let request = AdviceRequest::build(&[entry(1)], &latest()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(json["messages"][0]["role"], "user");
        let prompt = json["messages"][0]["content"].as_str().unwrap();
        assert!(prompt.contains(r#"[{"merchant":"Shop 1","amount":1.0,"category":"Food"}]"#));
        assert!(prompt.contains(r#"{"merchant":"Zomato","amount":349.5,"date":"4 Oct 2025"}"#));
        assert_eq!(prompt, request.prompt());
    }

    #[test]
    fn test_history_is_capped() {
        let history: Vec<_> = (0..50).map(entry).collect();
        let request = AdviceRequest::build(&history, &latest()).unwrap();
        assert!(request.prompt().contains("Shop 29"));
        assert!(!request.prompt().contains("Shop 30"));

        let request = AdviceRequest::build_with_limit(&history, &latest(), 2).unwrap();
        assert!(request.prompt().contains("Shop 1"));
        assert!(!request.prompt().contains("Shop 2\""));
    }

    #[test]
    fn test_empty_history() {
        let history: Vec<AdviceHistoryEntry> = Vec::new();
        let request = AdviceRequest::build(&history, &latest()).unwrap();
        assert!(request.prompt().contains("purchase history: []."));
    }

    #[test]
    fn test_response_text() {
        let response = AdviceResponse::from_json(r#"{"completion":"Spend less."}"#).unwrap();
        assert_eq!(response.advice_text(), "Spend less.");

        let response = AdviceResponse::from_json("{}").unwrap();
        assert_eq!(response.advice_text(), NO_COMPLETION_ADVICE);
    }

    #[test]
    fn test_unreadable_response() {
        assert!(matches!(
            AdviceResponse::from_json("<html>"),
            Err(crate::UpiscanError::Advice(AdviceError::Response(_)))
        ));
        assert_eq!(AdviceResponse::advice_for_body("<html>"), FAILED_ADVICE);
    }
}
