use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use star_sync::config::{self, SyncConfig};
use star_sync::db::connection::{connect_source, connect_sqlite};
use star_sync::db::migrate;
use star_sync::sync::{SyncOptions, full::full_load, incremental::incremental, plan};
use star_sync::validate::validate;
use star_sync::warehouse::watermark;

#[derive(Parser)]
#[command(version, about = "Sync a rental-store database into a star schema")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Source database (path, sqlite://path or sqlite:path).
    #[arg(long, global = true, value_name = "URL")]
    source: Option<String>,
    /// Target database [default: analytics.db].
    #[arg(long, global = true, value_name = "URL")]
    target: Option<String>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the star schema and seed watermarks.
    Init,
    /// Reload every table in one transaction.
    FullLoad,
    /// Sync rows changed since each table's watermark.
    Incremental {
        /// Extract and transform, write nothing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Compare source and target aggregates.
    Validate {
        /// Trailing window in days.
        #[arg(long)]
        days: Option<u32>,
        /// Allowed drift per metric, in percent.
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print stored watermarks.
    Status,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::resolve(cli.config.as_deref(), cli.source, cli.target)?;

    match cli.cmd {
        Cmd::Init => {
            let applied = migrate::run_sqlite(cfg.target_url())?;
            let mut target = connect_sqlite(cfg.target_url())?;
            let seeded = watermark::ensure(&mut target, plan::table_names())
                .context("seeding watermarks")?;
            info!(db = cfg.target_url(), applied, seeded, "target initialized");
        }
        Cmd::FullLoad => {
            let (mut source, mut target) = open_both(&cfg)?;
            let report = full_load(&mut source, &mut target)?;
            println!("{report}");
        }
        Cmd::Incremental { dry_run } => {
            let (mut source, mut target) = open_both(&cfg)?;
            let report = incremental(&mut source, &mut target, SyncOptions { dry_run })?;
            println!("{report}");
        }
        Cmd::Validate { days, threshold } => {
            let days = days.unwrap_or(cfg.validate.window_days);
            let threshold = threshold.unwrap_or(cfg.validate.threshold_pct);
            let (mut source, mut target) = open_both(&cfg)?;
            let report = validate(&mut source, &mut target, days, threshold)?;
            println!("{report}");
            if !report.ok {
                return Ok(ExitCode::from(2));
            }
        }
        Cmd::Status => {
            let mut target = connect_sqlite(cfg.target_url())?;
            for row in watermark::all(&mut target).context("reading sync_state")? {
                println!("{:<14} {}", row.table_name, row.last_synced);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_both(
    cfg: &SyncConfig,
) -> Result<(diesel::SqliteConnection, diesel::SqliteConnection)> {
    let source = connect_source(cfg.source_url()?).context("opening source")?;
    let target = connect_sqlite(cfg.target_url()).context("opening target")?;
    Ok((source, target))
}
