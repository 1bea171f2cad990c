//! CLI subcommands.

pub mod advice;
pub mod batch;
pub mod config;
pub mod ledger;
pub mod parse;

use std::path::{Path, PathBuf};

use tracing::debug;
use upiscan_core::models::config::UpiscanConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("upiscan")
        .join("config.json")
}

/// Load the config given with `--config`, else the default file if present,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<UpiscanConfig> {
    if let Some(path) = config_path {
        return Ok(UpiscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(UpiscanConfig::from_file(&default_path)?)
    } else {
        Ok(UpiscanConfig::default())
    }
}

/// Read OCR text from a file, or from stdin when the path is "-".
pub async fn read_text_input(input: &Path) -> anyhow::Result<String> {
    use tokio::io::AsyncReadExt;

    if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(tokio::fs::read_to_string(input).await?)
}
