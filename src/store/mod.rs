//! Persistence layer with pluggable storage backends.

pub mod db;
mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::future::Future;

use rust_decimal::Decimal;

use crate::domain::{Bet, BetSlip, BettingOdds, FixtureId, TransactionId, UserId, Wallet};
use crate::error::Result;

/// Storage operations for user wallets.
pub trait WalletStore: Send + Sync {
    /// Load a user's wallet, `None` if the user has never been seen.
    fn load_wallet(&self, user: &UserId) -> impl Future<Output = Result<Option<Wallet>>> + Send;

    /// Save a wallet, replacing any prior snapshot.
    fn save_wallet(&self, user: &UserId, wallet: &Wallet)
        -> impl Future<Output = Result<()>> + Send;

    /// Record a processed deposit transaction for idempotency.
    ///
    /// Returns false when the transaction id was already recorded.
    fn record_deposit(
        &self,
        txn: &TransactionId,
        user: &UserId,
        amount: Decimal,
    ) -> impl Future<Output = Result<bool>> + Send;
}

/// Storage operations for placed bets.
pub trait BetStore: Send + Sync {
    /// Append freshly placed bets to a user's ledger.
    fn append_bets(&self, user: &UserId, bets: &[Bet])
        -> impl Future<Output = Result<()>> + Send;

    /// Replace a stored bet by id. Returns false when the id is unknown.
    fn update_bet(&self, bet: &Bet) -> impl Future<Output = Result<bool>> + Send;

    /// All bets a user has placed, in placement order.
    fn bets_for_user(&self, user: &UserId) -> impl Future<Output = Result<Vec<Bet>>> + Send;

    /// Every still-pending bet on a fixture, across all users.
    fn pending_bets_for_fixture(
        &self,
        fixture: &FixtureId,
    ) -> impl Future<Output = Result<Vec<Bet>>> + Send;
}

/// Storage operations for working bet slips.
pub trait SlipStore: Send + Sync {
    /// Load a user's slip; users without one get an empty slip.
    fn load_slip(&self, user: &UserId) -> impl Future<Output = Result<BetSlip>> + Send;

    /// Save a slip, replacing any prior snapshot.
    fn save_slip(&self, user: &UserId, slip: &BetSlip)
        -> impl Future<Output = Result<()>> + Send;
}

/// Storage operations for the odds board.
pub trait CatalogStore: Send + Sync {
    /// Replace the whole board with a fresh feed snapshot.
    fn replace_odds(&self, odds: &[BettingOdds]) -> impl Future<Output = Result<()>> + Send;

    /// Every fixture currently on the board.
    fn list_odds(&self) -> impl Future<Output = Result<Vec<BettingOdds>>> + Send;

    /// One fixture's board entry.
    fn odds_for_fixture(
        &self,
        fixture: &FixtureId,
    ) -> impl Future<Output = Result<Option<BettingOdds>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Wallet;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn memory_store_wallet_roundtrip() {
        let store = MemoryStore::new();
        let user = UserId::new("user-1");
        let wallet = Wallet::new("USD", dec!(100));

        store.save_wallet(&user, &wallet).await.unwrap();
        let loaded = store.load_wallet(&user).await.unwrap();
        assert_eq!(loaded, Some(wallet));
    }

    #[tokio::test]
    async fn memory_store_unknown_wallet_is_none() {
        let store = MemoryStore::new();
        let loaded = store.load_wallet(&UserId::new("ghost")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn memory_store_deposit_idempotency() {
        let store = MemoryStore::new();
        let txn = TransactionId::new("txn_1");
        let user = UserId::new("user-1");

        assert!(store.record_deposit(&txn, &user, dec!(50)).await.unwrap());
        assert!(!store.record_deposit(&txn, &user, dec!(50)).await.unwrap());
    }
}
