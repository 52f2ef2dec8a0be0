//! Seed content loader
//!
//! Upserts the embedded seed documents (blog posts, categories, directory
//! tools) into the database. Every write is keyed by slug, so re-running a
//! seed is safe.
//!
//! **Usage:**
//! ```bash
//! fuelhub-seed --list
//! fuelhub-seed add-ai-customer-service-blog
//! fuelhub-seed --all --database ./fuelhub.db
//! ```
//!
//! Exits with status 1 on any error (unknown seed, database failure).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fuelhub_common::config::{resolve_database_path, TomlConfig};
use fuelhub_common::db::init::init_database;
use fuelhub_common::seed::{all_seed_names, catalogue, run_seeds};
use fuelhub_web::log_directives;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Seed content loader
#[derive(Parser, Debug)]
#[clap(name = "fuelhub-seed")]
#[clap(about = "Load embedded AI Fuel Hub seed content into the database")]
#[clap(version)]
struct Args {
    /// Path to TOML config file (default: platform config location)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Path to the SQLite database (overrides FUELHUB_DATABASE and config)
    #[clap(short, long)]
    database: Option<PathBuf>,

    /// List available seeds and exit
    #[clap(long)]
    list: bool,

    /// Apply every seed in catalogue order
    #[clap(long, conflicts_with = "names")]
    all: bool,

    /// Seeds to apply, in order
    #[clap(value_name = "NAME")]
    names: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Config is read before tracing starts so its log level can apply;
    // RUST_LOG still takes precedence
    let config = TomlConfig::load(args.config.as_deref());
    let directives = match &config {
        Ok(config) => log_directives(config),
        Err(_) => log_directives(&TomlConfig::default()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)),
        )
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Seeding failed: Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Seeding failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: TomlConfig) -> Result<()> {
    if args.list {
        for seed in catalogue() {
            println!("{}", seed.name);
        }
        return Ok(());
    }

    let names = if args.all {
        all_seed_names()
    } else {
        args.names
    };
    if names.is_empty() {
        bail!("No seeds selected (name one or more seeds, or pass --all; --list shows them)");
    }

    let db_path = resolve_database_path(args.database.as_deref(), &config);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let report = run_seeds(&pool, &names)
        .await
        .context("Failed to apply seeds")?;

    info!(
        "✓ Applied {} seed(s): {} categories, {} posts, {} tools, {} comparisons",
        names.len(),
        report.categories,
        report.posts,
        report.tools,
        report.comparisons
    );

    pool.close().await;
    Ok(())
}
