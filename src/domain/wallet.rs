//! Per-user wallet with stake reservation accounting.
//!
//! Funds move `balance -> pending_bets` when a bet is placed and leave
//! `pending_bets` exactly once when the bet settles. Every mutator validates
//! before touching state, so a returned error always leaves the wallet as it
//! was. `pending_bets` underflow means a bet settled twice or a stake was
//! never reserved; that is corrupted state, not bad input, and surfaces as
//! [`LedgerError::ConsistencyViolation`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::LedgerError;

/// A user's funds: spendable balance plus reserved stakes and lifetime tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: Decimal,
    currency: String,
    pending_bets: Decimal,
    total_won: Decimal,
    total_lost: Decimal,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new("USD", Decimal::ZERO)
    }
}

impl Wallet {
    /// Fresh wallet with no pending stakes or history.
    #[must_use]
    pub fn new(currency: impl Into<String>, starting_balance: Decimal) -> Self {
        Self {
            balance: starting_balance,
            currency: currency.into(),
            pending_bets: Decimal::ZERO,
            total_won: Decimal::ZERO,
            total_lost: Decimal::ZERO,
        }
    }

    /// Rehydrate a wallet from stored fields.
    #[must_use]
    pub fn from_parts(
        balance: Decimal,
        currency: impl Into<String>,
        pending_bets: Decimal,
        total_won: Decimal,
        total_lost: Decimal,
    ) -> Self {
        Self {
            balance,
            currency: currency.into(),
            pending_bets,
            total_won,
            total_lost,
        }
    }

    /// Spendable funds.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Display currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Stakes reserved on unsettled bets.
    #[must_use]
    pub fn pending_bets(&self) -> Decimal {
        self.pending_bets
    }

    /// Lifetime payouts credited from winning bets.
    #[must_use]
    pub fn total_won(&self) -> Decimal {
        self.total_won
    }

    /// Lifetime stakes forfeited to losing bets.
    #[must_use]
    pub fn total_lost(&self) -> Decimal {
        self.total_lost
    }

    /// Credit external funds.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        Self::require_positive("deposit amount", amount)?;
        self.balance += amount;
        Ok(())
    }

    /// Debit spendable funds for withdrawal. Reserved stakes are untouchable.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        Self::require_positive("withdrawal amount", amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Move a stake from spendable balance into the pending pool.
    pub fn reserve(&mut self, stake: Decimal) -> Result<(), LedgerError> {
        Self::require_positive("stake", stake)?;
        if stake > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: stake,
                available: self.balance,
            });
        }
        self.balance -= stake;
        self.pending_bets += stake;
        Ok(())
    }

    /// Release a winning stake and credit the full payout.
    pub fn settle_win(&mut self, stake: Decimal, payout: Decimal) -> Result<(), LedgerError> {
        self.release(stake)?;
        self.balance += payout;
        self.total_won += payout;
        Ok(())
    }

    /// Release a losing stake into the lifetime-lost tally.
    pub fn settle_loss(&mut self, stake: Decimal) -> Result<(), LedgerError> {
        self.release(stake)?;
        self.total_lost += stake;
        Ok(())
    }

    /// Void a reservation: the stake returns to spendable balance untouched.
    pub fn cancel_reservation(&mut self, stake: Decimal) -> Result<(), LedgerError> {
        self.release(stake)?;
        self.balance += stake;
        Ok(())
    }

    /// Take `amount` out of the pending pool, guarding against underflow.
    fn release(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount > self.pending_bets {
            return Err(LedgerError::ConsistencyViolation {
                detail: format!(
                    "pending_bets underflow: releasing {amount} with {} reserved",
                    self.pending_bets
                ),
            });
        }
        self.pending_bets -= amount;
        Ok(())
    }

    fn require_positive(field: &'static str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid(field, "must be greater than 0"));
        }
        Ok(())
    }
}
