//! WARDLINE Hospital Dashboards: Demo CLI
//!
//! Runs one or all of the four reference dashboard scenarios. Each scenario
//! seeds a board with mock hospital data, applies the filters given on the
//! command line and drives audited status transitions.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- consent --search smith
//!   cargo run -p demo -- ward --status critical --ticks 3
//!   cargo run -p demo -- alerts --priority high
//!   cargo run -p demo -- billing --config dashboard.toml

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wardline_contracts::error::RegistryResult;
use wardline_ref_hospital::{
    scenarios::{bulk_billing, consent_status, missed_visits, ward_status, ViewFilters},
    DashboardConfig,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// WARDLINE: filterable record registry for hospital dashboards.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "WARDLINE hospital dashboards demo",
    long_about = "Runs WARDLINE dashboard scenarios showing search and filters,\n\
                  status summaries, table-checked transitions and audit chain integrity."
)]
struct Cli {
    /// Dashboard configuration (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four dashboards in sequence, unfiltered.
    RunAll,
    /// Scenario 1: consent forms per patient (category = ward).
    Consent(FilterArgs),
    /// Scenario 2: ward patient status (category = ward).
    Ward {
        #[command(flatten)]
        filters: FilterArgs,
        /// Refresh the live metrics this many times before exiting.
        #[arg(long, default_value_t = 0)]
        ticks: u32,
    },
    /// Scenario 3: missed-visit alerts (category = ward).
    Alerts(FilterArgs),
    /// Scenario 4: bulk billing batches (category = client).
    Billing(FilterArgs),
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Case-insensitive text search.
    #[arg(long, default_value = "")]
    search: String,
    /// Status value, or "all".
    #[arg(long, default_value = "all")]
    status: String,
    /// Category value, or "all".
    #[arg(long, default_value = "all")]
    category: String,
    /// low | medium | high | critical, or "all".
    #[arg(long, default_value = "all")]
    priority: String,
}

impl From<FilterArgs> for ViewFilters {
    fn from(args: FilterArgs) -> Self {
        ViewFilters {
            search: args.search,
            status: args.status,
            category: args.category,
            priority: args.priority,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    match run(cli) {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> RegistryResult<()> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    debug!(
        refresh_interval_secs = config.refresh_interval_secs,
        jitter_percent = config.jitter_percent,
        "dashboard config loaded"
    );

    match cli.command {
        Command::RunAll => run_all(&config),
        Command::Consent(args) => consent_status::run_scenario(&config, &args.into()),
        Command::Ward { filters, ticks } => ward_status::run_scenario(&config, &filters.into(), ticks),
        Command::Alerts(args) => missed_visits::run_scenario(&config, &args.into()),
        Command::Billing(args) => bulk_billing::run_scenario(&config, &args.into()),
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all(config: &DashboardConfig) -> RegistryResult<()> {
    let filters = ViewFilters::default();
    consent_status::run_scenario(config, &filters)?;
    ward_status::run_scenario(config, &filters, 0)?;
    missed_visits::run_scenario(config, &filters)?;
    bulk_billing::run_scenario(config, &filters)?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("WARDLINE: Filterable Record Registry");
    println!("Hospital Dashboards Demo");
    println!("=====================================");
    println!();
    println!("Every status change follows the same pipeline:");
    println!("  [1] Look up the record by id in the board's store");
    println!("  [2] Transition table evaluates (from, to) → Allow / Deny (deny by default)");
    println!("  [3] Lifecycle sets the status and its dependent fields in one patch");
    println!("  [4] Attempt written to the SHA-256 audit chain, applied or rejected");
    println!("  [5] Store swaps in the updated record; owners recompute aggregates");
    println!();
}
