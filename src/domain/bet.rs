//! Placed-bet record and its settlement lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BetId, FixtureId, UserId};
use crate::domain::odds::AmericanOdds;
use crate::domain::payout::payout;
use crate::domain::selection::{BetType, Selection};
use crate::domain::slip::SlipEntry;
use crate::domain::LedgerError;

/// Settlement status of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    /// Stake reserved, outcome unknown.
    Pending,
    Won,
    Lost,
    /// Voided: stake returned, no winnings.
    Cancelled,
}

impl BetStatus {
    /// Returns true while the bet still awaits grading.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, BetStatus::Pending)
    }

    /// Returns true once the bet has reached a final state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

impl FromStr for BetStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(LedgerError::invalid(
                "status",
                format!("unknown bet status '{other}'"),
            )),
        }
    }
}

/// A committed wager.
///
/// `potential_payout` is computed from the odds at placement time and stored;
/// later line movement never changes what a settled ticket pays. Fields are
/// private so the status can only move through [`Bet::settle`], which enforces
/// the settle-exactly-once rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    id: BetId,
    user_id: UserId,
    fixture_id: FixtureId,
    bet_type: BetType,
    selection: Selection,
    odds: AmericanOdds,
    stake: Decimal,
    potential_payout: Decimal,
    status: BetStatus,
    placed_at: DateTime<Utc>,
    settled_at: Option<DateTime<Utc>>,
}

impl Bet {
    /// Rehydrate a bet from stored fields.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BetId,
        user_id: UserId,
        fixture_id: FixtureId,
        bet_type: BetType,
        selection: Selection,
        odds: AmericanOdds,
        stake: Decimal,
        potential_payout: Decimal,
        status: BetStatus,
        placed_at: DateTime<Utc>,
        settled_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            fixture_id,
            bet_type,
            selection,
            odds,
            stake,
            potential_payout,
            status,
            placed_at,
            settled_at,
        }
    }

    /// Commit a slip entry as a pending bet with the given stake share.
    ///
    /// Freezes the entry's odds into the ticket and computes the payout once.
    #[must_use]
    pub fn place(user_id: UserId, entry: &SlipEntry, stake: Decimal, placed_at: DateTime<Utc>) -> Self {
        let odds = entry.odds();
        Self {
            id: BetId::generate(),
            user_id,
            fixture_id: entry.fixture_id().clone(),
            bet_type: entry.bet_type(),
            selection: entry.selection().clone(),
            odds,
            stake,
            potential_payout: payout(stake, odds),
            status: BetStatus::Pending,
            placed_at,
            settled_at: None,
        }
    }

    /// Move the bet out of `Pending` exactly once.
    ///
    /// Rejects a second settlement and rejects `Pending` as a target.
    pub fn settle(&mut self, status: BetStatus, at: DateTime<Utc>) -> Result<(), LedgerError> {
        if status.is_pending() {
            return Err(LedgerError::invalid(
                "status",
                "cannot settle a bet back to pending",
            ));
        }
        if self.status.is_settled() {
            return Err(LedgerError::invalid(
                "bet",
                format!("bet {} already settled as {}", self.id, self.status),
            ));
        }
        self.status = status;
        self.settled_at = Some(at);
        Ok(())
    }

    /// Signed effect on the bettor's bankroll relative to the stake.
    ///
    /// Won: profit. Lost: negative stake. Pending and cancelled: zero.
    #[must_use]
    pub fn net_return(&self) -> Decimal {
        match self.status {
            BetStatus::Won => self.potential_payout - self.stake,
            BetStatus::Lost => -self.stake,
            BetStatus::Pending | BetStatus::Cancelled => Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn id(&self) -> BetId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn fixture_id(&self) -> &FixtureId {
        &self.fixture_id
    }

    #[must_use]
    pub fn bet_type(&self) -> BetType {
        self.bet_type
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn odds(&self) -> AmericanOdds {
        self.odds
    }

    #[must_use]
    pub fn stake(&self) -> Decimal {
        self.stake
    }

    #[must_use]
    pub fn potential_payout(&self) -> Decimal {
        self.potential_payout
    }

    #[must_use]
    pub fn status(&self) -> BetStatus {
        self.status
    }

    #[must_use]
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    #[must_use]
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }
}
