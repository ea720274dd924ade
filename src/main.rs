use analytics::AnalyticsEngine;
use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::{CalendarDay, DateRange, PeriodPreset};
use std::path::PathBuf;

mod fmt;
mod ledger;
mod logging;
mod render;

use render::Renderer;

/// The main entry point for the opstats reporting tool.
fn main() {
    // Load optional OPSTATS__* overrides from a .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Revenue, expense and return reports for daily business operations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ./opstats.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily statistics, totals, category breakdown and insights for one operation.
    Report(ReportArgs),
    /// Side-by-side totals for every operation in the ledger.
    Compare(CompareArgs),
    /// List the expense categories of an operation.
    Categories(CategoriesArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Path to the JSON ledger backup.
    #[arg(long)]
    ledger: PathBuf,

    /// Operation id or name.
    #[arg(long)]
    operation: String,

    #[command(flatten)]
    range: RangeArgs,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args)]
struct CompareArgs {
    /// Path to the JSON ledger backup.
    #[arg(long)]
    ledger: PathBuf,

    #[command(flatten)]
    range: RangeArgs,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args)]
struct CategoriesArgs {
    /// Path to the JSON ledger backup.
    #[arg(long)]
    ledger: PathBuf,

    /// Operation id or name.
    #[arg(long)]
    operation: String,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args)]
struct RangeArgs {
    /// First day of the range (format: YYYY-MM-DD).
    #[arg(long, requires = "to")]
    from: Option<CalendarDay>,

    /// Last day of the range (format: YYYY-MM-DD).
    #[arg(long, requires = "from")]
    to: Option<CalendarDay>,

    /// Preset window ending at --as-of: today, 7d, 15d or 30d.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    period: Option<PeriodPreset>,

    /// Reference day for --period (defaults to today).
    #[arg(long, conflicts_with_all = ["from", "to"])]
    as_of: Option<CalendarDay>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> Result<()> {
    let config = configuration::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = logging::init_tracing(&config.logging)?;

    let engine = AnalyticsEngine::new().with_warning_ratio(config.budget.warning_ratio);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Report(args) => {
            let backup = ledger::load_backup(&args.ledger)?;
            let operation = ledger::find_operation(&backup, &args.operation)?;
            let range = resolve_range(&args.range, &config)?;

            let report = engine.calculate(operation, &range)?;
            renderer(&config, args.format).report(&mut stdout, &report, operation)
        }
        Commands::Compare(args) => {
            let backup = ledger::load_backup(&args.ledger)?;
            let range = resolve_range(&args.range, &config)?;

            let rows = engine.compare(&backup.operations, &range)?;
            renderer(&config, args.format).comparison(&mut stdout, &rows, &range)
        }
        Commands::Categories(args) => {
            let backup = ledger::load_backup(&args.ledger)?;
            let operation = ledger::find_operation(&backup, &args.operation)?;
            renderer(&config, args.format).categories(&mut stdout, operation)
        }
    }
}

fn renderer(config: &Config, format: Option<OutputFormat>) -> Renderer<'_> {
    Renderer::new(&config.report.currency_symbol, format.unwrap_or(config.report.format))
}

/// Explicit dates win; otherwise the preset (or the configured default)
/// window ending at the reference day.
fn resolve_range(args: &RangeArgs, config: &Config) -> Result<DateRange> {
    match (args.from, args.to) {
        (Some(from), Some(to)) => Ok(DateRange::new(from, to)?),
        (None, None) => {
            let preset = match args.period {
                Some(preset) => preset,
                None => config.report.default_period()?,
            };
            let as_of = args
                .as_of
                .unwrap_or_else(|| CalendarDay::new(Local::now().date_naive()));
            Ok(preset.range_ending(as_of)?)
        }
        _ => bail!("--from and --to must be given together"),
    }
}
