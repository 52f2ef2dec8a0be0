//! fuelhub-web library - AI Fuel Hub web service
//!
//! JSON API consumed by the directory UI plus server-rendered pages with
//! metadata, hreflang alternates and JSON-LD injected into every `<head>`.

use std::sync::Arc;

use axum::Router;
use fuelhub_common::config::{SiteConfig, TomlConfig};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod pages;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Site identity used for canonical URLs and structured data
    pub site: Arc<SiteConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, site: SiteConfig) -> Self {
        Self {
            db,
            site: Arc::new(site),
        }
    }
}

/// Default `EnvFilter` directives for the binaries when `RUST_LOG` is unset
pub fn log_directives(config: &TomlConfig) -> String {
    format!("{},tower_http=info", config.logging.level)
}

/// Build application router
///
/// All routes are public and read-only. Locale-prefixed page paths and
/// unknown paths go through [`pages::fallback`].
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::api_routes())
        .merge(pages::page_routes())
        .fallback(pages::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directives_follow_config_level() {
        assert_eq!(log_directives(&TomlConfig::default()), "info,tower_http=info");

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        let directives = log_directives(&config);
        assert_eq!(directives, "debug,tower_http=info");
        assert!(tracing_subscriber::EnvFilter::try_new(&directives).is_ok());
    }
}
