//! Application Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `HOUSE_PRICE_*` environment variables (`__` between sections,
//! e.g. `HOUSE_PRICE_SERVER__ADDR=127.0.0.1:3000`).

use config::{Config, ConfigError, Environment, File};
use inference_engine::ArtifactPaths;
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "HOUSE_PRICE_CONFIG";

/// Config file used when `HOUSE_PRICE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/predictor.toml";

const ENV_PREFIX: &str = "HOUSE_PRICE";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactPaths,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Prefix for formatted prices
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "\u{20b9}".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load from the file named by `HOUSE_PRICE_CONFIG` (or the default path)
    /// plus the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load from a specific file (missing file is fine) plus the environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
