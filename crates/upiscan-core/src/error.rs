//! Error types for the upiscan-core library.
//!
//! Receipt parsing itself never fails; these cover the work around it.

use thiserror::Error;

/// Main error type for the upiscan library.
#[derive(Error, Debug)]
pub enum UpiscanError {
    /// Purchase ledger error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Advice payload error.
    #[error("advice error: {0}")]
    Advice(#[from] AdviceError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to purchase records and the ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// An edited amount could not be read as a non-negative number.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// A purchase was requested from a screenshot nothing could be parsed from.
    #[error("no purchase was parsed from the screenshot")]
    NothingParsed,

    /// No purchase with the given id.
    #[error("purchase not found: {0}")]
    NotFound(String),
}

/// Errors related to the advice request/response payloads.
#[derive(Error, Debug)]
pub enum AdviceError {
    /// The prompt could not be assembled.
    #[error("failed to build prompt: {0}")]
    Prompt(String),

    /// The service response was not understood.
    #[error("malformed advice response: {0}")]
    Response(String),
}

/// Result type for the upiscan library.
pub type Result<T> = std::result::Result<T, UpiscanError>;
