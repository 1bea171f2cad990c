//! Parse command - extract a purchase from one OCR text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use upiscan_core::receipt::SAMPLE_RECEIPT_TEXT;
use upiscan_core::{ExtractionResult, ParsedPurchase, ReceiptParser, ReceiptTextParser};

use super::{load_config, read_text_input};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print notes about guessed or defaulted fields to stderr
    #[arg(long)]
    show_warnings: bool,

    /// Succeed even if nothing could be parsed
    #[arg(long)]
    allow_empty: bool,
}

/// Arguments for the sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing input: {}", args.input.display());
    let text = read_text_input(&args.input).await?;

    let parser = ReceiptTextParser::new().with_warnings(config.extraction.emit_warnings);
    let result = parser.parse(&text);

    if result.purchase.is_none() && !args.allow_empty {
        anyhow::bail!(
            "No purchase found in {}: could not extract amount or merchant",
            args.input.display()
        );
    }

    let output = format_purchase(result.purchase.as_ref(), args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings {
        print_warnings(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub async fn run_sample(args: SampleArgs) -> anyhow::Result<()> {
    let result = ReceiptTextParser::new().parse(SAMPLE_RECEIPT_TEXT);
    println!("{}", format_purchase(result.purchase.as_ref(), args.format)?);
    Ok(())
}

fn print_warnings(result: &ExtractionResult) {
    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
    eprintln!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );
}

pub fn format_purchase(
    purchase: Option<&ParsedPurchase>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&purchase)?),
        OutputFormat::Csv => format_csv(purchase),
        OutputFormat::Text => Ok(format_text(purchase)),
    }
}

pub const CSV_HEADER: [&str; 6] = [
    "merchant",
    "amount",
    "date",
    "transaction_id",
    "transaction_type",
    "suggested_category",
];

pub fn csv_row(purchase: &ParsedPurchase) -> [String; 6] {
    [
        purchase.merchant.clone(),
        purchase.amount.to_string(),
        purchase.date.clone().unwrap_or_default(),
        purchase.transaction_id.clone().unwrap_or_default(),
        purchase
            .transaction_type
            .map(|t| t.to_string())
            .unwrap_or_default(),
        purchase
            .suggested_category
            .map(|c| c.to_string())
            .unwrap_or_default(),
    ]
}

fn format_csv(purchase: Option<&ParsedPurchase>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    if let Some(purchase) = purchase {
        wtr.write_record(csv_row(purchase))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(purchase: Option<&ParsedPurchase>) -> String {
    let Some(purchase) = purchase else {
        return "No purchase found".to_string();
    };

    let mut output = String::new();
    output.push_str(&format!("Merchant: {}\n", purchase.merchant));
    output.push_str(&format!("Amount:   ₹{}\n", purchase.amount));
    if let Some(date) = &purchase.date {
        output.push_str(&format!("Date:     {}\n", date));
    }
    if let Some(id) = &purchase.transaction_id {
        output.push_str(&format!("Txn ID:   {}\n", id));
    }
    if let Some(kind) = purchase.transaction_type {
        output.push_str(&format!("Type:     {}\n", kind));
    }
    if let Some(category) = purchase.suggested_category {
        output.push_str(&format!("Category: {} (suggested)\n", category));
    }

    output
}
