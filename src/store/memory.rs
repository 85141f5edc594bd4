//! In-memory store implementation for tests and ephemeral runs.

use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use super::{BetStore, CatalogStore, SlipStore, WalletStore};
use crate::domain::{Bet, BetSlip, BettingOdds, FixtureId, TransactionId, UserId, Wallet};
use crate::error::Result;

/// In-memory store backing every storage trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    wallets: RwLock<HashMap<UserId, Wallet>>,
    deposits: RwLock<HashMap<TransactionId, (UserId, Decimal)>>,
    bets: RwLock<HashMap<UserId, Vec<Bet>>>,
    slips: RwLock<HashMap<UserId, BetSlip>>,
    odds: RwLock<HashMap<FixtureId, BettingOdds>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl WalletStore for MemoryStore {
    async fn load_wallet(&self, user: &UserId) -> Result<Option<Wallet>> {
        Ok(self.wallets.read().get(user).cloned())
    }

    async fn save_wallet(&self, user: &UserId, wallet: &Wallet) -> Result<()> {
        self.wallets.write().insert(user.clone(), wallet.clone());
        Ok(())
    }

    async fn record_deposit(
        &self,
        txn: &TransactionId,
        user: &UserId,
        amount: Decimal,
    ) -> Result<bool> {
        let mut deposits = self.deposits.write();
        if deposits.contains_key(txn) {
            return Ok(false);
        }
        deposits.insert(txn.clone(), (user.clone(), amount));
        Ok(true)
    }
}

impl BetStore for MemoryStore {
    async fn append_bets(&self, user: &UserId, bets: &[Bet]) -> Result<()> {
        self.bets
            .write()
            .entry(user.clone())
            .or_default()
            .extend_from_slice(bets);
        Ok(())
    }

    async fn update_bet(&self, bet: &Bet) -> Result<bool> {
        let mut all = self.bets.write();
        let Some(user_bets) = all.get_mut(bet.user_id()) else {
            return Ok(false);
        };
        match user_bets.iter_mut().find(|b| b.id() == bet.id()) {
            Some(slot) => {
                *slot = bet.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn bets_for_user(&self, user: &UserId) -> Result<Vec<Bet>> {
        Ok(self.bets.read().get(user).cloned().unwrap_or_default())
    }

    async fn pending_bets_for_fixture(&self, fixture: &FixtureId) -> Result<Vec<Bet>> {
        Ok(self
            .bets
            .read()
            .values()
            .flatten()
            .filter(|b| b.fixture_id() == fixture && b.status().is_pending())
            .cloned()
            .collect())
    }
}

impl SlipStore for MemoryStore {
    async fn load_slip(&self, user: &UserId) -> Result<BetSlip> {
        Ok(self.slips.read().get(user).cloned().unwrap_or_default())
    }

    async fn save_slip(&self, user: &UserId, slip: &BetSlip) -> Result<()> {
        self.slips.write().insert(user.clone(), slip.clone());
        Ok(())
    }
}

impl CatalogStore for MemoryStore {
    async fn replace_odds(&self, odds: &[BettingOdds]) -> Result<()> {
        let mut board = self.odds.write();
        board.clear();
        board.extend(odds.iter().map(|o| (o.fixture_id.clone(), o.clone())));
        Ok(())
    }

    async fn list_odds(&self) -> Result<Vec<BettingOdds>> {
        Ok(self.odds.read().values().cloned().collect())
    }

    async fn odds_for_fixture(&self, fixture: &FixtureId) -> Result<Option<BettingOdds>> {
        Ok(self.odds.read().get(fixture).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AmericanOdds, BetStatus, MoneylinePick, Selection, SlipEntry};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn board_entry(fixture: &str) -> BettingOdds {
        BettingOdds {
            fixture_id: FixtureId::new(fixture),
            home_team: "Home".into(),
            away_team: "Away".into(),
            league: "League".into(),
            start_time: Utc::now(),
            moneyline: None,
            spread: None,
            total: None,
            last_updated: Utc::now(),
        }
    }

    fn pending_bet(user: &str, fixture: &str) -> Bet {
        let entry = SlipEntry::new(
            &board_entry(fixture),
            Selection::Moneyline {
                pick: MoneylinePick::Home,
                team: "Home".into(),
            },
            AmericanOdds::new(-120).unwrap(),
            Utc::now(),
        );
        Bet::place(UserId::new(user), &entry, dec!(10), Utc::now())
    }

    #[tokio::test]
    async fn update_bet_replaces_stored_copy() {
        let store = MemoryStore::new();
        let user = UserId::new("user-1");
        let mut bet = pending_bet("user-1", "1");

        store.append_bets(&user, std::slice::from_ref(&bet)).await.unwrap();
        bet.settle(BetStatus::Won, Utc::now()).unwrap();
        assert!(store.update_bet(&bet).await.unwrap());

        let stored = store.bets_for_user(&user).await.unwrap();
        assert_eq!(stored[0].status(), BetStatus::Won);
    }

    #[tokio::test]
    async fn update_unknown_bet_reports_false() {
        let store = MemoryStore::new();
        assert!(!store.update_bet(&pending_bet("user-1", "1")).await.unwrap());
    }

    #[tokio::test]
    async fn pending_bets_for_fixture_spans_users_and_skips_settled() {
        let store = MemoryStore::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let a = pending_bet("alice", "1");
        let mut b = pending_bet("bob", "1");
        let other = pending_bet("alice", "2");

        store.append_bets(&alice, &[a, other]).await.unwrap();
        store.append_bets(&bob, std::slice::from_ref(&b)).await.unwrap();

        b.settle(BetStatus::Lost, Utc::now()).unwrap();
        store.update_bet(&b).await.unwrap();

        let pending = store
            .pending_bets_for_fixture(&FixtureId::new("1"))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].user_id(), &alice);
    }

    #[tokio::test]
    async fn replace_odds_swaps_the_whole_board() {
        let store = MemoryStore::new();
        store
            .replace_odds(&[board_entry("1"), board_entry("2")])
            .await
            .unwrap();
        store.replace_odds(&[board_entry("3")]).await.unwrap();

        let board = store.list_odds().await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].fixture_id, FixtureId::new("3"));

        assert!(store
            .odds_for_fixture(&FixtureId::new("1"))
            .await
            .unwrap()
            .is_none());
    }
}
