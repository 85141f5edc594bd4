//! Store-agnostic sportsbook domain logic.

mod bet;
mod error;
mod ids;
mod odds;
mod selection;
mod settlement;
mod slip;
mod wallet;

pub mod payout;

// Identifiers
pub use ids::{BetId, FixtureId, TransactionId, UserId};

// Prices and the odds board
pub use odds::{AmericanOdds, BettingOdds, MoneylineOdds, SpreadOdds, TotalOdds};

// Selections and tickets
pub use bet::{Bet, BetStatus};
pub use selection::{BetType, MoneylinePick, Selection, TeamSide, TotalSide};
pub use slip::{BetSlip, EntryId, SlipAdd, SlipEntry};

// Wallet and settlement
pub use settlement::{resolve, BetOutcome, FixtureResult};
pub use wallet::Wallet;

// Errors
pub use error::LedgerError;
