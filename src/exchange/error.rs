//! Exchange errors

use thiserror::Error;

/// Error types for exchange operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Exchange rejected request (HTTP {status}, code {code}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    #[error("Unexpected HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Symbol {0} not found in exchangeInfo")]
    SymbolNotFound(String),

    #[error("Symbol {symbol} has no {filter} filter")]
    MissingFilter {
        symbol: String,
        filter: &'static str,
    },

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("API credentials are required to sign requests")]
    MissingCredentials,

    #[error("Signing error: {0}")]
    Signing(String),
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Parse(err.to_string())
    }
}

impl ExchangeError {
    /// Short machine-friendly name, used as a metric label
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::Network(_) => "network",
            ExchangeError::Api { .. } => "api",
            ExchangeError::Http { .. } => "http",
            ExchangeError::SymbolNotFound(_) => "symbol_not_found",
            ExchangeError::MissingFilter { .. } => "missing_filter",
            ExchangeError::Parse(_) => "parse",
            ExchangeError::MissingCredentials => "missing_credentials",
            ExchangeError::Signing(_) => "signing",
        }
    }
}
