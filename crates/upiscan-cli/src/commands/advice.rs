//! Advice command - build the advice request for the latest purchase and
//! read back service responses.

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use upiscan_core::{AdviceHistoryEntry, AdviceRequest, AdviceResponse, LatestPurchase, PurchaseLedger};

use super::{load_config, read_text_input};

/// Arguments for the advice command.
#[derive(Args)]
pub struct AdviceArgs {
    /// Ledger file (default: from config)
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    /// Purchase to ask about (default: the newest one)
    #[arg(long)]
    latest: Option<String>,

    /// Print only the prompt text
    #[arg(long)]
    prompt_only: bool,

    /// Read a service response body ("-" for stdin) and print its advice
    #[arg(long, conflicts_with_all = ["latest", "prompt_only"])]
    response: Option<PathBuf>,
}

pub async fn run(args: AdviceArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if let Some(response) = &args.response {
        let body = read_text_input(response).await?;
        println!("{}", AdviceResponse::advice_for_body(&body));
        return Ok(());
    }

    let config = load_config(config_path)?;
    let path = args.ledger.unwrap_or_else(|| config.ledger.path.clone());
    let ledger = PurchaseLedger::load(&path)?;

    let latest = match &args.latest {
        Some(id) => ledger
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Purchase not found: {}", id))?,
        None => ledger
            .purchases()
            .first()
            .ok_or_else(|| anyhow::anyhow!("Ledger {} has no purchases", path.display()))?,
    };

    let history: Vec<AdviceHistoryEntry> = ledger
        .purchases()
        .iter()
        .filter(|p| p.id != latest.id)
        .take(config.ledger.advice_history_limit)
        .map(AdviceHistoryEntry::from)
        .collect();
    debug!("Advice history holds {} purchases", history.len());

    let request = AdviceRequest::build_with_limit(
        &history,
        &LatestPurchase::from(latest),
        config.advice.prompt_history_limit,
    )?;
    info!("Advice request for {} at {}", latest.id, config.advice.endpoint);

    if args.prompt_only {
        println!("{}", request.prompt());
    } else {
        println!("{}", serde_json::to_string_pretty(&request)?);
    }

    Ok(())
}
