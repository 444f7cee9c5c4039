use analytics::{MarketAssumptions, MetricsEngine};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use configuration::{load_config, Analytics};
use core_types::TradeAction;
use engine::PortfolioService;
use ledger::InMemoryLedger;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use trading::TradingEngine;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Meridian portfolio analytics backend.
fn main() {
    // Route all tracing output to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Portfolio accounting and analytics over a trade ledger file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full portfolio metrics object for a user.
    Report(ReportArgs),
    /// List a user's open positions.
    Positions(PositionsArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the JSON trade file to replay.
    #[arg(long)]
    trades: PathBuf,

    /// The user to compute metrics for.
    #[arg(long)]
    user: i64,

    /// Trailing window in days (defaults to the configured window).
    #[arg(long)]
    days: Option<i64>,
}

#[derive(Parser)]
struct PositionsArgs {
    /// Path to the JSON trade file to replay.
    #[arg(long)]
    trades: PathBuf,

    /// The user to list positions for.
    #[arg(long)]
    user: i64,
}

/// One line of the input trade file. Results are not part of the input;
/// they are realized during the replay.
#[derive(Debug, Deserialize)]
struct TradeInstruction {
    user_id: i64,
    symbol: String,
    action: TradeAction,
    quantity: u32,
    price: Decimal,
    timestamp: DateTime<Utc>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    match cli.command {
        Commands::Report(args) => handle_report(args, &config.analytics),
        Commands::Positions(args) => handle_positions(args),
    }
}

fn handle_report(args: ReportArgs, analytics: &Analytics) -> anyhow::Result<()> {
    let (_engine, ledger) = replay_trades(&args.trades)?;
    let service = PortfolioService::new(
        ledger,
        MetricsEngine::with_assumptions(assumptions_from(analytics)),
    );

    let window_days = args.days.unwrap_or(analytics.default_window_days);
    let metrics = service.portfolio_metrics(args.user, window_days);

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn handle_positions(args: PositionsArgs) -> anyhow::Result<()> {
    let (engine, _ledger) = replay_trades(&args.trades)?;
    let positions = engine.positions(args.user)?;

    println!("{}", serde_json::to_string_pretty(&positions)?);
    Ok(())
}

/// Reads the trade file and replays it through the trading engine, in
/// timestamp order, so sells realize their P&L exactly as they would have
/// live.
fn replay_trades(path: &PathBuf) -> anyhow::Result<(TradingEngine, Arc<InMemoryLedger>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trade file {}", path.display()))?;
    let mut instructions: Vec<TradeInstruction> =
        serde_json::from_str(&raw).context("trade file is not a valid JSON trade list")?;
    instructions.sort_by_key(|t| t.timestamp);

    let ledger = Arc::new(InMemoryLedger::new());
    let engine = TradingEngine::new(ledger.clone());

    for instruction in &instructions {
        match instruction.action {
            TradeAction::Buy => engine.record_buy_at(
                instruction.user_id,
                &instruction.symbol,
                instruction.quantity,
                instruction.price,
                instruction.timestamp,
            )?,
            TradeAction::Sell => engine.record_sell_at(
                instruction.user_id,
                &instruction.symbol,
                instruction.quantity,
                instruction.price,
                instruction.timestamp,
            )?,
        };
    }
    tracing::info!(count = instructions.len(), "trade file replayed");

    Ok((engine, ledger))
}

fn assumptions_from(analytics: &Analytics) -> MarketAssumptions {
    MarketAssumptions {
        risk_free_rate: analytics.risk_free_rate,
        market_return: analytics.market_return,
        market_volatility: analytics.market_volatility,
        market_correlation: analytics.market_correlation,
        base_capital: analytics.base_capital,
        trading_days: analytics.trading_days,
    }
}
