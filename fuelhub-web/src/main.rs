//! fuelhub-web - AI Fuel Hub web service
//!
//! Serves the JSON API and the server-rendered directory, review and blog
//! pages from a single SQLite database.
//!
//! Settings resolve in priority order: command line, `FUELHUB_*`
//! environment variables, TOML config file, built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fuelhub_common::config::{resolve_database_path, TomlConfig};
use fuelhub_common::db::init::init_database;
use fuelhub_web::{build_router, log_directives, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for fuelhub-web
#[derive(Parser, Debug)]
#[command(name = "fuelhub-web")]
#[command(about = "AI Fuel Hub directory and blog web service")]
#[command(version)]
struct Args {
    /// Path to TOML config file (default: platform config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the SQLite database (overrides FUELHUB_DATABASE and config)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(short, long, env = "FUELHUB_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "FUELHUB_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so its log level can apply;
    // RUST_LOG still takes precedence
    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_directives(&config))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting AI Fuel Hub (fuelhub-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db_path = resolve_database_path(args.database.as_deref(), &config);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    let bind = args.bind.unwrap_or_else(|| config.bind.clone());
    let port = args.port.unwrap_or(config.port);
    info!("Site base URL: {}", config.site.base());

    let state = AppState::new(pool, config.site);
    let app = build_router(state);

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fuelhub-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
