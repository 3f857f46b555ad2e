//! stonebridge - roster pairing CLI
//!
//! Usage:
//!   stonebridge pair --roster roster.csv [--master providers.csv] [--out dir]
//!   stonebridge serve [--addr 127.0.0.1:8080]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use stonebridge_pairing::api::{AppState, create_router};
use stonebridge_pairing::config::ConfigLoader;
use stonebridge_pairing::input::load_table;
use stonebridge_pairing::normalize::{
    DateFormatHint, HeaderStrategy, NormalizerOptions, RowPolicy,
};
use stonebridge_pairing::pipeline::{PairingReport, run_pairing};

#[derive(Parser)]
#[command(name = "stonebridge", version, about = "Pair interviewers with testers from a shift roster")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pair a roster file and write the calendar import CSV
    Pair {
        /// Roster file (.csv, .xlsx, .xls, .xlsm, .ods)
        #[arg(long)]
        roster: PathBuf,

        /// Provider master file with language and preferred tester columns
        #[arg(long)]
        master: Option<PathBuf>,

        /// Directory for the calendar CSV
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Directory holding rules.yaml and aliases.yaml
        #[arg(long, env = "STONEBRIDGE_CONFIG")]
        config: Option<PathBuf>,

        /// How to read slashed dates
        #[arg(long, value_enum, default_value_t = DateFormatArg::Auto)]
        date_format: DateFormatArg,

        /// Leave blank modality cells empty instead of inferring from the site
        #[arg(long)]
        no_infer_modality: bool,

        /// Header matching strategy
        #[arg(long, value_enum, default_value_t = StrategyArg::AliasFallback)]
        strategy: StrategyArg,

        /// Drop incomplete rows instead of failing the run
        #[arg(long)]
        drop_invalid: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Directory holding rules.yaml and aliases.yaml
        #[arg(long, env = "STONEBRIDGE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DateFormatArg {
    Auto,
    MmDdYyyy,
}

impl From<DateFormatArg> for DateFormatHint {
    fn from(arg: DateFormatArg) -> Self {
        match arg {
            DateFormatArg::Auto => DateFormatHint::Auto,
            DateFormatArg::MmDdYyyy => DateFormatHint::MonthDayYear,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Exact,
    AliasFallback,
}

impl From<StrategyArg> for HeaderStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Exact => HeaderStrategy::ExactHeadersOnly,
            StrategyArg::AliasFallback => HeaderStrategy::AliasFallback,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Pair {
            roster,
            master,
            out,
            config,
            date_format,
            no_infer_modality,
            strategy,
            drop_invalid,
        } => {
            let options = NormalizerOptions {
                strategy: strategy.into(),
                row_policy: if drop_invalid {
                    RowPolicy::DropInvalid
                } else {
                    RowPolicy::FailFast
                },
                infer_modality: !no_infer_modality,
                date_format: date_format.into(),
                ..NormalizerOptions::default()
            };
            pair(&roster, master.as_deref(), &out, config.as_deref(), &options)
        }
        Command::Serve { addr, config } => serve(addr, config.as_deref()).await,
    }
}

fn load_config(dir: Option<&Path>) -> Result<ConfigLoader> {
    match dir {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("Failed to load config from {}", dir.display())),
        None => Ok(ConfigLoader::default()),
    }
}

fn pair(
    roster: &Path,
    master: Option<&Path>,
    out: &Path,
    config: Option<&Path>,
    options: &NormalizerOptions,
) -> Result<()> {
    let config = load_config(config)?;
    let roster_table = load_table(roster)?;
    let master_table = master.map(load_table).transpose()?;

    let report = run_pairing(&roster_table, master_table.as_ref(), options, &config)?;

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;
    let path = out.join(&report.filename);
    std::fs::write(&path, &report.calendar_csv)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), events = report.events.len(), "Wrote calendar CSV");

    print_report(&report, &path);
    Ok(())
}

fn print_report(report: &PairingReport, path: &Path) {
    println!("Calendar: {}", path.display());

    println!("\nShifts per site:");
    for count in &report.shifts_per_site {
        println!("  {:<30} {}", count.name, count.count);
    }

    println!("\nShifts per provider:");
    for count in &report.shifts_per_provider {
        println!("  {:<30} {}", count.name, count.count);
    }

    if !report.dropped_rows.is_empty() {
        println!("\nDropped rows: {}", report.dropped_rows.len());
        for dropped in &report.dropped_rows {
            let missing: Vec<String> = dropped.missing.iter().map(|f| f.to_string()).collect();
            println!("  row {}: missing {}", dropped.row, missing.join(", "));
        }
    }

    println!("\nViolations: {}", report.violations.len());
    for v in &report.violations {
        println!(
            "  {} {} {} | {}: {}{}",
            v.site,
            v.date,
            v.modality,
            v.violation_type,
            v.interviewer,
            v.tester
                .as_deref()
                .map(|t| format!(" + {}", t))
                .unwrap_or_default()
        );
    }

    println!("\nGaps: {}", report.gaps.len());
    for gap in &report.gaps {
        let who = match (&gap.interviewer, &gap.tester) {
            (Some(i), _) => format!("interviewer {}", i),
            (None, Some(t)) => format!("tester {}", t),
            (None, None) => String::new(),
        };
        println!("  {} {} {} | {}", gap.site, gap.date, gap.modality, who);
    }
}

async fn serve(addr: SocketAddr, config: Option<&Path>) -> Result<()> {
    info!("Starting stonebridge v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(config)?;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("stonebridge listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
