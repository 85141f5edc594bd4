use thiserror::Error;

use crate::domain::LedgerError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Odds feed errors with structured variants.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("odds request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed odds payload: {0}")]
    Malformed(String),

    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the error indicates corrupted ledger state rather than a
    /// rejected request. Fatal errors should abort the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Ledger(LedgerError::ConsistencyViolation { .. })
        )
    }
}
