//! Ledger command - save parsed purchases and inspect spending.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use rust_decimal::Decimal;
use tracing::info;

use upiscan_core::models::config::UpiscanConfig;
use upiscan_core::{OcrResult, PurchaseDraft, PurchaseLedger};

use super::{load_config, read_text_input};

/// Arguments for the ledger command.
#[derive(Args)]
pub struct LedgerArgs {
    /// Ledger file (default: from config)
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: LedgerCommand,
}

#[derive(Subcommand)]
enum LedgerCommand {
    /// Parse a screenshot's OCR text and save it as a purchase
    Add(AddArgs),

    /// List saved purchases, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show spending per category
    Totals {
        /// Only count the N newest purchases
        #[arg(long)]
        last: Option<usize>,

        /// Only count the configured number of recent purchases
        #[arg(long, conflicts_with = "last")]
        recent: bool,
    },

    /// Remove a purchase by id
    Remove {
        /// Purchase id
        id: String,
    },

    /// Remove every purchase
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct AddArgs {
    /// OCR text file ("-" reads stdin)
    input: PathBuf,

    /// Override the parsed merchant
    #[arg(long)]
    merchant: Option<String>,

    /// Override the parsed amount
    #[arg(long)]
    amount: Option<String>,

    /// Override the parsed date
    #[arg(long)]
    date: Option<String>,

    /// Category (default: the suggested one)
    #[arg(long)]
    category: Option<String>,

    /// Screenshot the text came from
    #[arg(long)]
    image: Option<String>,
}

pub async fn run(args: LedgerArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let path = args.ledger.unwrap_or_else(|| config.ledger.path.clone());
    let mut ledger = PurchaseLedger::load(&path)?;

    match args.command {
        LedgerCommand::Add(add_args) => {
            add_purchase(&mut ledger, add_args, &config).await?;
            ledger.save(&path)?;
        }
        LedgerCommand::List { json } => list_purchases(&ledger, json)?,
        LedgerCommand::Totals { last, recent } => {
            let limit = if recent {
                Some(config.ledger.recent_limit)
            } else {
                last
            };
            show_totals(&ledger, limit);
        }
        LedgerCommand::Remove { id } => {
            let removed = ledger.remove(&id)?;
            ledger.save(&path)?;
            println!(
                "{} Removed {} ₹{}",
                style("✓").green(),
                removed.merchant,
                removed.amount
            );
        }
        LedgerCommand::Clear { yes } => {
            if !yes {
                anyhow::bail!(
                    "Refusing to delete {} purchases without --yes",
                    ledger.len()
                );
            }
            ledger.clear();
            ledger.save(&path)?;
            println!("{} Ledger cleared", style("✓").green());
        }
    }

    Ok(())
}

async fn add_purchase(
    ledger: &mut PurchaseLedger,
    args: AddArgs,
    config: &UpiscanConfig,
) -> anyhow::Result<()> {
    let text = read_text_input(&args.input).await?;
    let ocr = OcrResult::from_text(text);
    if ocr.parsed.is_none() {
        anyhow::bail!("No purchase detected. Try a clearer screenshot.");
    }

    let mut draft = PurchaseDraft::from_parsed(ocr.parsed)
        .with_currency(config.extraction.default_currency.as_str());
    if let Some(merchant) = args.merchant {
        draft = draft.with_merchant(merchant);
    }
    if let Some(amount) = args.amount {
        draft = draft.with_amount(amount);
    }
    if let Some(date) = args.date {
        draft = draft.with_date(date);
    }
    if let Some(category) = args.category {
        draft = draft.with_category(category);
    }
    if let Some(image) = args.image {
        draft = draft.with_source_image(image);
    }

    let added = ledger.add(draft.into_purchase()?);
    info!("Added purchase {}", added.id);
    println!(
        "{} Added {} ₹{} [{}] ({})",
        style("✓").green(),
        added.merchant,
        added.amount,
        added.category_label(),
        added.id
    );

    Ok(())
}

fn list_purchases(ledger: &PurchaseLedger, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ledger)?);
        return Ok(());
    }

    if ledger.is_empty() {
        println!("{} No purchases saved", style("ℹ").blue());
        return Ok(());
    }

    for p in ledger.purchases() {
        println!(
            "{}  {:<24} {:>12}  {:<14} {}",
            style(&p.id).dim(),
            p.merchant,
            format!("₹{:.2}", p.amount),
            p.category_label(),
            p.date.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

fn show_totals(ledger: &PurchaseLedger, limit: Option<usize>) {
    let totals = match limit {
        Some(n) => ledger.totals_last_n(n),
        None => ledger.total_by_category(),
    };
    let grand_total: Decimal = totals.values().copied().sum();

    for (category, amount) in &totals {
        let share = if grand_total.is_zero() {
            Decimal::ZERO
        } else {
            (amount * Decimal::ONE_HUNDRED / grand_total).round()
        };
        println!("{:<16} ₹{:>12.2}  {:>3}%", category, amount, share);
    }
    println!("{:<16} ₹{:>12.2}", style("Total").bold(), grand_total);
}
