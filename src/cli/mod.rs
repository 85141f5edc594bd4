//! Command-line interface definitions.

pub mod bets;
pub mod check;
pub mod odds;
pub mod output;
pub mod payments;
pub mod run;
pub mod settle;
pub mod slip;
pub mod wallet;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{BetId, BetStatus, UserId};
use crate::error::Result;
use crate::ledger::Sportsbook;
use crate::store::db::{create_pool, run_migrations};
use crate::store::SqliteStore;

/// Stakehouse - sportsbook wallet, bet slip, and settlement ledger.
#[derive(Parser, Debug)]
#[command(name = "stakehouse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the odds feed and keep the local board fresh (foreground)
    Run(RunArgs),

    /// Refresh the odds board once and print it
    Odds(OddsArgs),

    /// Manage the bet slip
    #[command(subcommand)]
    Slip(SlipCommand),

    /// Place every staged selection, splitting the stake evenly
    Place(PlaceArgs),

    /// Show wallet balances
    Wallet(SessionArgs),

    /// Credit the wallet balance
    Deposit(AmountArgs),

    /// Debit the available balance
    Withdraw(AmountArgs),

    /// Apply payment-provider deposit notices
    #[command(subcommand)]
    Payments(PaymentsCommand),

    /// List placed bets, optionally filtered by status
    History(HistoryArgs),

    /// Cancel a pending bet and refund its stake
    Cancel(CancelArgs),

    /// Grade every pending bet on a finished fixture
    Settle(SettleArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `stakehouse slip`
#[derive(Subcommand, Debug)]
pub enum SlipCommand {
    /// Stage a selection at the board's current price
    Add(SlipAddArgs),
    /// Remove a staged selection
    Remove(SlipRemoveArgs),
    /// Clear the whole slip
    Clear(SessionArgs),
    /// Show staged selections
    Show(SessionArgs),
}

/// Subcommands for `stakehouse payments`
#[derive(Subcommand, Debug)]
pub enum PaymentsCommand {
    /// Apply deposit notices from a JSON file, skipping duplicates
    Consume(PaymentsConsumeArgs),
}

/// Subcommands for `stakehouse check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
    /// Test the connection to the odds feed
    Feed(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Shared arguments for commands that act on a user's ledger.
#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Serve the built-in mock board instead of calling the live feed
    #[arg(long)]
    pub mock: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `odds` subcommand.
#[derive(Parser, Debug)]
pub struct OddsArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the configured sport key
    #[arg(short, long)]
    pub sport: Option<String>,

    /// Serve the built-in mock board instead of calling the live feed
    #[arg(long)]
    pub mock: bool,
}

/// Arguments for the `slip add` subcommand.
#[derive(Parser, Debug)]
pub struct SlipAddArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,

    /// Fixture id from the odds board
    pub fixture: String,

    /// Market to bet into
    #[arg(short, long, value_enum)]
    pub market: MarketArg,

    /// Outcome to back
    #[arg(short, long, value_enum)]
    pub side: SideArg,
}

/// Arguments for the `slip remove` subcommand.
#[derive(Parser, Debug)]
pub struct SlipRemoveArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,

    /// Slip entry id to remove
    pub entry: String,
}

/// Arguments for the `place` subcommand.
#[derive(Parser, Debug)]
pub struct PlaceArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,

    /// Total stake in dollars, split evenly across staged selections
    #[arg(short, long)]
    pub stake: Decimal,
}

/// Arguments for the `deposit` and `withdraw` subcommands.
#[derive(Parser, Debug)]
pub struct AmountArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,

    /// Amount in dollars
    #[arg(short, long)]
    pub amount: Decimal,
}

/// Arguments for the `payments consume` subcommand.
#[derive(Parser, Debug)]
pub struct PaymentsConsumeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON file with an array of deposit notices
    pub file: PathBuf,
}

/// Arguments for the `history` subcommand.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,

    /// Only show bets with this status
    #[arg(long)]
    pub status: Option<BetStatus>,
}

/// Arguments for the `cancel` subcommand.
#[derive(Parser, Debug)]
pub struct CancelArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Act as this user instead of the configured default
    #[arg(short, long)]
    pub user: Option<String>,

    /// Bet id to cancel
    pub bet: BetId,
}

/// Arguments for the `settle` subcommand.
#[derive(Parser, Debug)]
pub struct SettleArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Fixture id to settle
    pub fixture: String,

    /// Final home score
    #[arg(long)]
    pub home_score: u32,

    /// Final away score
    #[arg(long)]
    pub away_score: u32,
}

/// Market selector for `slip add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarketArg {
    Moneyline,
    Spread,
    Total,
}

/// Outcome selector for `slip add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Home,
    Away,
    Draw,
    Over,
    Under,
}

/// The acting user: the `--user` flag when given, the configured default
/// otherwise.
pub fn resolve_user(flag: Option<&str>, config: &Config) -> UserId {
    match flag {
        Some(user) => UserId::new(user),
        None => UserId::new(config.session.default_user.clone()),
    }
}

/// Open the SQLite store named by the configuration, running migrations.
pub fn open_store(config: &Config) -> Result<Arc<SqliteStore>> {
    let pool = create_pool(&config.store.database_url)?;
    run_migrations(&pool)?;
    Ok(Arc::new(SqliteStore::new(pool)))
}

/// Open the store and wrap it in a ledger seeded from configuration.
pub fn open_sportsbook(config: &Config) -> Result<(Arc<SqliteStore>, Sportsbook<SqliteStore>)> {
    let store = open_store(config)?;
    let book = Sportsbook::new(
        Arc::clone(&store),
        config.wallet.currency.clone(),
        config.wallet.starting_balance,
    );
    Ok((store, book))
}
