//! CLI for parsing payment-screenshot OCR text into purchases.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{advice, batch, config, ledger, parse};

/// upiscan - Extract purchases from payment-app screenshot text
#[derive(Parser)]
#[command(name = "upiscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one OCR text file ("-" for stdin)
    Parse(parse::ParseArgs),

    /// Parse multiple OCR text files
    Batch(batch::BatchArgs),

    /// Parse the built-in sample screenshot text
    Sample(parse::SampleArgs),

    /// Manage saved purchases
    Ledger(ledger::LedgerArgs),

    /// Build the spending advice request
    Advice(advice::AdviceArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Parse(args) => parse::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Sample(args) => parse::run_sample(args).await,
        Commands::Ledger(args) => ledger::run(args, config_path).await,
        Commands::Advice(args) => advice::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
