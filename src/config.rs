//! Configuration types for order-bot

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Binance USD-M futures testnet REST endpoint
pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Exchange REST configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Validity window for signed requests (milliseconds)
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    FUTURES_TESTNET_URL.to_string()
}
fn default_recv_window_ms() -> u64 {
    5000
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recv_window_ms: default_recv_window_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Trade history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV file that accepted orders are appended to
    #[serde(default = "default_trades_csv")]
    pub trades_csv: PathBuf,
}

fn default_trades_csv() -> PathBuf {
    PathBuf::from("logs/trades.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            trades_csv: default_trades_csv(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Console log level (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Append-only debug log of requests and responses
    #[serde(default = "default_log_file")]
    pub log_file: Option<PathBuf>,

    /// Console log format
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Console log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("logs/trading.log"))
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: default_log_file(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// API key pair used to sign private requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    /// Read credentials from the environment.
    ///
    /// `BINANCE_API_KEY` / `BINANCE_API_SECRET` take precedence over the
    /// generic `API_KEY` / `API_SECRET`. Returns `None` unless both are set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let pick = |primary: &str, fallback: &str| {
            lookup(primary)
                .or_else(|| lookup(fallback))
                .filter(|v| !v.trim().is_empty())
        };
        Some(Self {
            api_key: pick("BINANCE_API_KEY", "API_KEY")?,
            api_secret: pick("BINANCE_API_SECRET", "API_SECRET")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
