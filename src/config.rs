//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with sane defaults for every
//! field, so a missing file or empty section still yields a working setup.
//! The odds API key is sensitive and only ever read from the `ODDS_API_KEY`
//! environment variable, never from the file.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Odds feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Wallet defaults for first-seen users.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// CLI session defaults.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

/// Odds feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Sport key requested from the feed, e.g. `soccer_epl`.
    #[serde(default = "default_sport")]
    pub sport: String,

    /// Seconds between board refreshes in watch mode.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bookmaker regions requested from the feed.
    #[serde(default = "default_regions")]
    pub regions: String,

    /// Market keys requested from the feed.
    #[serde(default = "default_markets")]
    pub markets: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Loaded from `ODDS_API_KEY`, never from the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sport: default_sport(),
            poll_interval_secs: default_poll_interval_secs(),
            api_base_url: default_api_base_url(),
            regions: default_regions(),
            markets: default_markets(),
            request_timeout_secs: default_request_timeout_secs(),
            api_key: None,
        }
    }
}

/// Wallet defaults applied when a user is seen for the first time.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub starting_balance: Decimal,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            starting_balance: Decimal::ZERO,
        }
    }
}

/// CLI session defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// User acted for when `--user` is not passed.
    #[serde(default = "default_user")]
    pub default_user: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_database_url() -> String {
    "stakehouse.db".to_string()
}

fn default_sport() -> String {
    "soccer".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_api_base_url() -> String {
    "https://api.the-odds-api.com".to_string()
}

fn default_regions() -> String {
    "us".to_string()
}

fn default_markets() -> String {
    "h2h,spreads,totals".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_user() -> String {
    "user-1".to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.feed.api_key = std::env::var("ODDS_API_KEY").ok();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            config.feed.api_key = std::env::var("ODDS_API_KEY").ok();
            Ok(config)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.store.database_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database_url",
            }
            .into());
        }
        if self.feed.sport.is_empty() {
            return Err(ConfigError::MissingField { field: "sport" }.into());
        }
        if self.feed.api_base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_base_url",
            }
            .into());
        }
        if self.feed.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.feed.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.wallet.currency.is_empty() {
            return Err(ConfigError::MissingField { field: "currency" }.into());
        }
        if self.wallet.starting_balance < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "starting_balance",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.session.default_user.is_empty() {
            return Err(ConfigError::MissingField {
                field: "default_user",
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.store.database_url, "stakehouse.db");
        assert_eq!(config.feed.sport, "soccer");
        assert_eq!(config.feed.poll_interval_secs, 30);
        assert_eq!(config.wallet.currency, "USD");
        assert_eq!(config.wallet.starting_balance, Decimal::ZERO);
        assert_eq!(config.session.default_user, "user-1");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::parse_toml(
            r#"
            [feed]
            sport = "basketball_nba"

            [wallet]
            starting_balance = "1000"
            "#,
        )
        .unwrap();

        assert_eq!(config.feed.sport, "basketball_nba");
        assert_eq!(config.feed.regions, "us");
        assert_eq!(config.wallet.starting_balance, dec!(1000));
        assert_eq!(config.wallet.currency, "USD");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let err = Config::parse_toml("[feed]\npoll_interval_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn negative_starting_balance_is_rejected() {
        let err = Config::parse_toml("[wallet]\nstarting_balance = \"-5\"\n").unwrap_err();
        assert!(err.to_string().contains("starting_balance"));
    }

    #[test]
    fn empty_database_url_is_rejected() {
        let err = Config::parse_toml("[store]\ndatabase_url = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("database_url"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("not [valid toml").unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
