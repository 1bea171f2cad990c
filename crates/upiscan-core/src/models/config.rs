//! Configuration structures for parsing, the ledger and advice payloads.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ledger::{DEFAULT_ADVICE_HISTORY_LIMIT, DEFAULT_RECENT_LIMIT};
use crate::advice::PROMPT_HISTORY_LIMIT;
use crate::error::{Result, UpiscanError};

/// Main configuration for upiscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpiscanConfig {
    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,

    /// Purchase ledger configuration.
    pub ledger: LedgerConfig,

    /// Advice payload configuration.
    pub advice: AdviceConfig,
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency recorded on purchases created from screenshots.
    pub default_currency: String,

    /// Report low-confidence extractions as warnings.
    pub emit_warnings: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_currency: "INR".to_string(),
            emit_warnings: true,
        }
    }
}

/// Purchase ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON file holding saved purchases.
    pub path: PathBuf,

    /// Number of newest purchases used for recent totals.
    pub recent_limit: usize,

    /// Number of newest purchases summarized for the advice service.
    pub advice_history_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("purchases.json"),
            recent_limit: DEFAULT_RECENT_LIMIT,
            advice_history_limit: DEFAULT_ADVICE_HISTORY_LIMIT,
        }
    }
}

/// Advice service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// LLM endpoint the request payload is meant for.
    pub endpoint: String,

    /// History entries embedded in the prompt.
    pub prompt_history_limit: usize,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.a0.dev/ai/llm".to_string(),
            prompt_history_limit: PROMPT_HISTORY_LIMIT,
        }
    }
}

impl UpiscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| UpiscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
