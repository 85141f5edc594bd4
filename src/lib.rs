//! Stakehouse - a sportsbook wallet and bet-slip ledger.
//!
//! This crate keeps a local betting ledger in sync with an odds feed: it
//! polls a board of fixtures and prices, stages picks on a per-user bet slip,
//! places them as single-bet tickets with the stake split evenly, and grades
//! every pending ticket when a fixture's final score comes in. All money
//! moves through a wallet whose balance, pending stakes, and win/loss totals
//! are kept exactly, with decimal arithmetic and rounding only at display.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Store-agnostic types: odds, selections, slips, bets, wallets
//! - [`domain::payout`] - American-odds payout arithmetic
//! - [`error`] - Error types for the crate
//! - [`feed`] - Odds ingestion: live client, mock board, fallback catalog
//! - [`ledger`] - The sportsbook service coordinating wallets, slips, and bets
//! - [`payments`] - Payment-provider deposit notices
//! - [`store`] - Persistence: SQLite behind storage traits, in-memory for tests
//! - [`cli`] - Command-line interface
//! - [`app`] - The odds-watching foreground loop
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use stakehouse::domain::payout::payout;
//! use stakehouse::domain::AmericanOdds;
//!
//! let price = AmericanOdds::new(150)?;
//! assert_eq!(payout(dec!(10), price), dec!(25.00));
//! # Ok::<(), stakehouse::domain::LedgerError>(())
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod payments;
pub mod store;
