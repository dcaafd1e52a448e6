//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment variable
//! override (`HEMPBOARD_DATABASE_URL`) for the warehouse location, so
//! deployments can keep credentials/paths out of the config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};
use crate::paths;

/// Environment variable overriding `[database].path`.
pub const DATABASE_URL_ENV: &str = "HEMPBOARD_DATABASE_URL";

/// Warehouse storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite warehouse database.
    #[serde(default = "paths::default_database")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: paths::default_database(),
        }
    }
}

/// Retrieval-cache configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// How long a cached table retrieval stays fresh, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

/// Targets for the dashboard derivations.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Exact metric name driving the market trend series.
    pub market_metric: String,
    /// Target year for the state tax ranking.
    pub tax_year: i32,
    /// Target quarter for the state tax ranking.
    pub tax_quarter: i32,
    /// Number of states shown in the tax ranking.
    pub top_states: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            market_metric: "US Industrial Hemp Market".into(),
            tax_year: 2023,
            tax_quarter: 4,
            top_states: 8,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so `--json` output on stdout stays machine-readable.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load from the given path, or fall back to the default location,
    /// or to built-in defaults when no config file exists at all.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default = paths::default_config();
        if default.exists() {
            return Self::load(default);
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            self.database.path = PathBuf::from(url);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }
        if self.dashboard.market_metric.is_empty() {
            return Err(ConfigError::MissingField {
                field: "dashboard.market_metric",
            }
            .into());
        }
        if !(1..=4).contains(&self.dashboard.tax_quarter) {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.tax_quarter",
                reason: format!("expected 1..=4, got {}", self.dashboard.tax_quarter),
            }
            .into());
        }
        if self.dashboard.top_states == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.top_states",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
