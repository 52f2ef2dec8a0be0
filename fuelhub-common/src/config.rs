//! Configuration loading and database path resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`FUELHUB_*`)
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing TOML file is not an error: defaults are used and a warning is logged.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the database path
pub const DATABASE_ENV_VAR: &str = "FUELHUB_DATABASE";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "FUELHUB_CONFIG";

/// Default database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "fuelhub.db";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Interface the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public site identity used in metadata and structured data
    #[serde(default)]
    pub site: SiteConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bind: default_bind(),
            port: default_port(),
            site: SiteConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Public site identity
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute base URL without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_site_description")]
    pub description: String,

    /// Path or absolute URL of the logo image
    #[serde(default = "default_logo")]
    pub logo: String,

    #[serde(default = "default_twitter_handle")]
    pub twitter_handle: String,

    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            name: default_site_name(),
            description: default_site_description(),
            logo: default_logo(),
            twitter_handle: default_twitter_handle(),
            default_locale: default_locale(),
        }
    }
}

impl SiteConfig {
    /// Base URL with any trailing slash removed
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base(), path)
        } else {
            format!("{}/{}", self.base(), path)
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://aifuelhub.com".to_string()
}

fn default_site_name() -> String {
    "AI Fuel Hub".to_string()
}

fn default_site_description() -> String {
    "Discover, compare and review the best AI tools for business, marketing and productivity."
        .to_string()
}

fn default_logo() -> String {
    "/logo.png".to_string()
}

fn default_twitter_handle() -> String {
    "@aifuelhub".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults when no file exists
    ///
    /// `explicit` comes from the command line; otherwise `FUELHUB_CONFIG` and
    /// then the platform config locations are tried. An explicitly named file
    /// that cannot be read is an error; a missing discovered file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var(CONFIG_ENV_VAR)
                .ok()
                .map(PathBuf::from)
                .or_else(default_config_file),
        };

        let Some(path) = path else {
            warn!("No config file found, using built-in defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            warn!("Config file {} not found, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Get the first existing platform config file path
///
/// Linux tries `~/.config/fuelhub/config.toml` then `/etc/fuelhub/config.toml`.
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("fuelhub").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/fuelhub/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("fuelhub"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/fuelhub"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("fuelhub"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/fuelhub"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("fuelhub"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\fuelhub"))
    } else {
        PathBuf::from("./fuelhub_data")
    }
}

/// Resolve the database path: CLI argument, then `FUELHUB_DATABASE`, then TOML,
/// then the default data folder
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.database_path {
        return path.clone();
    }

    default_data_folder().join(DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.site.name, "AI Fuel Hub");
        assert_eq!(config.logging.level, "info");
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = TomlConfig::from_toml_str(
            r#"
            database_path = "/srv/fuelhub/site.db"
            port = 8080

            [site]
            base_url = "https://example.org/"
            name = "Example"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, Some(PathBuf::from("/srv/fuelhub/site.db")));
        assert_eq!(config.site.base(), "https://example.org");
        assert_eq!(config.site.default_locale, "en-US");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_absolute_url() {
        let site = SiteConfig::default();
        assert_eq!(site.absolute_url("/tools"), "https://aifuelhub.com/tools");
        assert_eq!(site.absolute_url("blog"), "https://aifuelhub.com/blog");
        assert_eq!(
            site.absolute_url("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
