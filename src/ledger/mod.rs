//! The sportsbook ledger: wallet custody, slip management, bet placement,
//! and settlement.
//!
//! All balance-mutating operations serialize per user through an async lock,
//! so concurrent commands cannot interleave a read-modify-write on the same
//! wallet. Reads (wallet view, history) skip the lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::domain::payout::format_usd;
use crate::domain::{
    resolve, Bet, BetId, BetOutcome, BetSlip, BetStatus, BettingOdds, EntryId, FixtureResult,
    LedgerError, Selection, SlipAdd, SlipEntry, UserId, Wallet,
};
use crate::error::Result;
use crate::payments::DepositNotice;
use crate::store::{BetStore, SlipStore, WalletStore};

/// What happened to a deposit notice.
#[derive(Debug)]
pub enum DepositOutcome {
    /// Credited and recorded under its transaction id.
    Applied { wallet: Wallet },
    /// The transaction id was seen before; the wallet is untouched.
    AlreadyApplied,
}

impl DepositOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, DepositOutcome::Applied { .. })
    }
}

/// Confirmation returned by [`Sportsbook::place_bet`].
#[derive(Debug)]
pub struct BetReceipt {
    pub message: String,
    pub total_stake: Decimal,
    pub bets: Vec<Bet>,
}

/// Tally of one settlement run over a fixture's pending bets.
#[derive(Debug, Default, Clone)]
pub struct SettlementSummary {
    pub settled: usize,
    pub won: usize,
    pub lost: usize,
    pub refunded: usize,
    pub skipped: usize,
    pub total_paid_out: Decimal,
}

/// Coordinates wallets, slips, and bets on top of a storage backend.
///
/// Not `Clone`; share it behind an `Arc` when multiple tasks need it.
pub struct Sportsbook<S> {
    store: Arc<S>,
    locks: DashMap<UserId, Arc<Mutex<()>>>,
    currency: String,
    starting_balance: Decimal,
}

impl<S> Sportsbook<S> {
    /// `currency` and `starting_balance` seed wallets for users that have
    /// never been seen before.
    pub fn new(store: Arc<S>, currency: impl Into<String>, starting_balance: Decimal) -> Self {
        Self {
            store,
            locks: DashMap::new(),
            currency: currency.into(),
            starting_balance,
        }
    }

    async fn lock_user(&self, user: &UserId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

impl<S> Sportsbook<S>
where
    S: WalletStore + BetStore + SlipStore,
{
    async fn wallet_or_default(&self, user: &UserId) -> Result<Wallet> {
        Ok(self
            .store
            .load_wallet(user)
            .await?
            .unwrap_or_else(|| Wallet::new(self.currency.clone(), self.starting_balance)))
    }

    /// Current wallet view, seeding a fresh one for unknown users.
    pub async fn wallet(&self, user: &UserId) -> Result<Wallet> {
        self.wallet_or_default(user).await
    }

    pub async fn deposit(&self, user: &UserId, amount: Decimal) -> Result<Wallet> {
        let _guard = self.lock_user(user).await;

        let mut wallet = self.wallet_or_default(user).await?;
        wallet.deposit(amount)?;
        self.store.save_wallet(user, &wallet).await?;

        info!(user = %user, amount = %amount, "Deposit credited");
        Ok(wallet)
    }

    pub async fn withdraw(&self, user: &UserId, amount: Decimal) -> Result<Wallet> {
        let _guard = self.lock_user(user).await;

        let mut wallet = self.wallet_or_default(user).await?;
        wallet.withdraw(amount)?;
        self.store.save_wallet(user, &wallet).await?;

        info!(user = %user, amount = %amount, "Withdrawal debited");
        Ok(wallet)
    }

    /// Apply a processor deposit notice exactly once.
    ///
    /// The transaction id is claimed before the wallet is touched, so a
    /// redelivered notice reports [`DepositOutcome::AlreadyApplied`] instead
    /// of crediting twice.
    pub async fn apply_deposit(&self, notice: &DepositNotice) -> Result<DepositOutcome> {
        if notice.amount <= Decimal::ZERO {
            return Err(
                LedgerError::invalid("amount", "deposit amount must be greater than 0").into(),
            );
        }

        let _guard = self.lock_user(&notice.user_id).await;

        let fresh = self
            .store
            .record_deposit(&notice.transaction_id, &notice.user_id, notice.amount)
            .await?;
        if !fresh {
            info!(
                user = %notice.user_id,
                transaction = %notice.transaction_id,
                "Deposit notice already applied, skipping"
            );
            return Ok(DepositOutcome::AlreadyApplied);
        }

        let mut wallet = self.wallet_or_default(&notice.user_id).await?;
        wallet.deposit(notice.amount)?;
        self.store.save_wallet(&notice.user_id, &wallet).await?;

        info!(
            user = %notice.user_id,
            transaction = %notice.transaction_id,
            amount = %notice.amount,
            "Deposit notice applied"
        );
        Ok(DepositOutcome::Applied { wallet })
    }

    pub async fn slip(&self, user: &UserId) -> Result<BetSlip> {
        self.store.load_slip(user).await
    }

    /// Stage a selection on the slip at the board's current price.
    ///
    /// Staging the same (fixture, outcome) twice leaves the slip unchanged
    /// and keeps the originally captured odds.
    pub async fn add_selection(
        &self,
        user: &UserId,
        board: &BettingOdds,
        selection: Selection,
    ) -> Result<SlipAdd> {
        let Some(price) = board.price_for(&selection) else {
            return Err(LedgerError::invalid(
                "selection",
                format!("{selection} is not quoted for {}", board.matchup()),
            )
            .into());
        };

        let _guard = self.lock_user(user).await;

        let mut slip = self.store.load_slip(user).await?;
        let outcome = slip.add(SlipEntry::new(board, selection, price, Utc::now()));
        if let SlipAdd::Added { entry_id } = &outcome {
            self.store.save_slip(user, &slip).await?;
            info!(user = %user, entry = %entry_id, "Selection staged");
        }
        Ok(outcome)
    }

    /// Remove a staged entry. Returns whether anything was removed.
    pub async fn remove_selection(&self, user: &UserId, entry: &EntryId) -> Result<bool> {
        let _guard = self.lock_user(user).await;

        let mut slip = self.store.load_slip(user).await?;
        let removed = slip.remove(entry);
        if removed {
            self.store.save_slip(user, &slip).await?;
        }
        Ok(removed)
    }

    pub async fn clear_slip(&self, user: &UserId) -> Result<()> {
        let _guard = self.lock_user(user).await;
        self.store.save_slip(user, &BetSlip::default()).await
    }

    /// Place every staged selection as a single-bet ticket, splitting
    /// `total_stake` evenly across entries.
    ///
    /// Validation order is fixed: empty slip, then non-positive stake, then
    /// insufficient balance. On success the total stake moves from balance to
    /// pending, the bets are appended to history, and the slip is cleared.
    pub async fn place_bet(&self, user: &UserId, total_stake: Decimal) -> Result<BetReceipt> {
        let _guard = self.lock_user(user).await;

        let slip = self.store.load_slip(user).await?;
        if slip.is_empty() {
            return Err(LedgerError::EmptySlip.into());
        }
        if total_stake <= Decimal::ZERO {
            return Err(LedgerError::invalid("stake", "stake must be greater than 0").into());
        }

        let mut wallet = self.wallet_or_default(user).await?;
        if total_stake > wallet.balance() {
            return Err(LedgerError::InsufficientFunds {
                requested: total_stake,
                available: wallet.balance(),
            }
            .into());
        }

        let per_entry = total_stake / Decimal::from(slip.len());
        let placed_at = Utc::now();
        let bets: Vec<Bet> = slip
            .entries()
            .iter()
            .map(|entry| Bet::place(user.clone(), entry, per_entry, placed_at))
            .collect();

        wallet.reserve(total_stake)?;
        self.store.append_bets(user, &bets).await?;
        self.store.save_wallet(user, &wallet).await?;
        self.store.save_slip(user, &BetSlip::default()).await?;

        info!(
            user = %user,
            bets = bets.len(),
            total_stake = %total_stake,
            "Bets placed"
        );

        Ok(BetReceipt {
            message: format!(
                "Bet placed successfully! Total stake: {}",
                format_usd(total_stake)
            ),
            total_stake,
            bets,
        })
    }

    /// Bet history, newest last, optionally filtered by status.
    pub async fn history(&self, user: &UserId, status: Option<BetStatus>) -> Result<Vec<Bet>> {
        let mut bets = self.store.bets_for_user(user).await?;
        if let Some(status) = status {
            bets.retain(|bet| bet.status() == status);
        }
        Ok(bets)
    }

    /// Cancel a pending bet and refund its stake to the balance.
    pub async fn cancel_bet(&self, user: &UserId, bet_id: BetId) -> Result<Bet> {
        let _guard = self.lock_user(user).await;

        let bets = self.store.bets_for_user(user).await?;
        let mut bet = bets
            .into_iter()
            .find(|bet| bet.id() == bet_id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: "bet",
                id: bet_id.to_string(),
            })?;

        bet.settle(BetStatus::Cancelled, Utc::now())?;

        let mut wallet = self.wallet_or_default(user).await?;
        wallet.cancel_reservation(bet.stake())?;

        if !self.store.update_bet(&bet).await? {
            return Err(LedgerError::ConsistencyViolation {
                detail: format!("bet {} vanished during cancellation", bet.id()),
            }
            .into());
        }
        self.store.save_wallet(user, &wallet).await?;

        info!(user = %user, bet = %bet.id(), stake = %bet.stake(), "Bet cancelled");
        Ok(bet)
    }

    /// Grade every pending bet on a fixture against its final score.
    ///
    /// Wins credit the stored potential payout, losses burn the stake,
    /// pushes refund it. Selections that cannot be graded from a score stay
    /// pending and are counted as skipped.
    pub async fn settle_fixture(&self, result: &FixtureResult) -> Result<SettlementSummary> {
        let pending = self
            .store
            .pending_bets_for_fixture(&result.fixture_id)
            .await?;

        let mut summary = SettlementSummary::default();
        if pending.is_empty() {
            info!(fixture = %result.fixture_id, "No pending bets to settle");
            return Ok(summary);
        }

        let mut by_user: HashMap<UserId, Vec<Bet>> = HashMap::new();
        for bet in pending {
            by_user.entry(bet.user_id().clone()).or_default().push(bet);
        }

        for (user, bets) in by_user {
            let _guard = self.lock_user(&user).await;

            let mut wallet = self.wallet_or_default(&user).await?;
            let mut wallet_dirty = false;

            for mut bet in bets {
                let now = Utc::now();
                match resolve(bet.selection(), result) {
                    BetOutcome::Won => {
                        bet.settle(BetStatus::Won, now)?;
                        wallet.settle_win(bet.stake(), bet.potential_payout())?;
                        summary.won += 1;
                        summary.total_paid_out += bet.potential_payout();
                    }
                    BetOutcome::Lost => {
                        bet.settle(BetStatus::Lost, now)?;
                        wallet.settle_loss(bet.stake())?;
                        summary.lost += 1;
                    }
                    BetOutcome::Push => {
                        bet.settle(BetStatus::Cancelled, now)?;
                        wallet.cancel_reservation(bet.stake())?;
                        summary.refunded += 1;
                    }
                    BetOutcome::Unresolved => {
                        warn!(
                            bet = %bet.id(),
                            selection = %bet.selection(),
                            "Selection cannot be graded from a score, leaving pending"
                        );
                        summary.skipped += 1;
                        continue;
                    }
                }

                if !self.store.update_bet(&bet).await? {
                    return Err(LedgerError::ConsistencyViolation {
                        detail: format!("bet {} vanished during settlement", bet.id()),
                    }
                    .into());
                }
                wallet_dirty = true;
                summary.settled += 1;
            }

            if wallet_dirty {
                self.store.save_wallet(&user, &wallet).await?;
            }
        }

        info!(
            fixture = %result.fixture_id,
            settled = summary.settled,
            won = summary.won,
            lost = summary.lost,
            refunded = summary.refunded,
            skipped = summary.skipped,
            paid_out = %summary.total_paid_out,
            "Fixture settled"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AmericanOdds, FixtureId, MoneylineOdds, MoneylinePick, SpreadOdds, TotalOdds, TotalSide,
    };
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn odds(value: i32) -> AmericanOdds {
        AmericanOdds::new(value).unwrap()
    }

    fn book() -> Sportsbook<MemoryStore> {
        Sportsbook::new(Arc::new(MemoryStore::new()), "USD", dec!(0))
    }

    fn test_board() -> BettingOdds {
        BettingOdds {
            fixture_id: FixtureId::new("fix-1"),
            home_team: "Arsenal".into(),
            away_team: "Chelsea".into(),
            league: "Premier League".into(),
            start_time: Utc::now() + chrono::Duration::hours(1),
            moneyline: Some(MoneylineOdds {
                home: odds(-120),
                away: odds(150),
                draw: Some(odds(280)),
            }),
            spread: Some(SpreadOdds {
                home: odds(-110),
                away: odds(-110),
                line: dec!(-1.5),
            }),
            total: Some(TotalOdds {
                over: odds(-120),
                under: odds(100),
                line: dec!(3.0),
            }),
            last_updated: Utc::now(),
        }
    }

    fn away_ml() -> Selection {
        Selection::Moneyline {
            pick: MoneylinePick::Away,
            team: "Chelsea".into(),
        }
    }

    fn over() -> Selection {
        Selection::Total {
            side: TotalSide::Over,
            line: dec!(3.0),
        }
    }

    async fn funded_slip(book: &Sportsbook<MemoryStore>, user: &UserId) {
        book.deposit(user, dec!(1000)).await.unwrap();
        let board = test_board();
        book.add_selection(user, &board, away_ml()).await.unwrap();
        book.add_selection(user, &board, over()).await.unwrap();
    }

    #[tokio::test]
    async fn deposit_and_withdraw_move_the_balance() {
        let book = book();
        let user = UserId::new("user-1");

        let wallet = book.deposit(&user, dec!(500)).await.unwrap();
        assert_eq!(wallet.balance(), dec!(500));

        let wallet = book.withdraw(&user, dec!(120)).await.unwrap();
        assert_eq!(wallet.balance(), dec!(380));
    }

    #[tokio::test]
    async fn deposit_notices_apply_exactly_once() {
        let book = book();
        let notice: DepositNotice = serde_json::from_str(
            r#"{"userId": "user-1", "amount": "250.00", "transactionId": "txn-1"}"#,
        )
        .unwrap();

        assert!(book.apply_deposit(&notice).await.unwrap().is_applied());
        assert!(!book.apply_deposit(&notice).await.unwrap().is_applied());

        let wallet = book.wallet(&notice.user_id).await.unwrap();
        assert_eq!(wallet.balance(), dec!(250));
    }

    #[tokio::test]
    async fn non_positive_deposit_notice_is_rejected() {
        let book = book();
        let notice: DepositNotice = serde_json::from_str(
            r#"{"userId": "user-1", "amount": "0", "transactionId": "txn-1"}"#,
        )
        .unwrap();

        let err = book.apply_deposit(&notice).await.unwrap_err();
        assert!(err.to_string().contains("greater than 0"));

        // The rejected notice must not burn the transaction id.
        let retry: DepositNotice = serde_json::from_str(
            r#"{"userId": "user-1", "amount": "50", "transactionId": "txn-1"}"#,
        )
        .unwrap();
        assert!(book.apply_deposit(&retry).await.unwrap().is_applied());
    }

    #[tokio::test]
    async fn staging_the_same_outcome_twice_keeps_one_entry() {
        let book = book();
        let user = UserId::new("user-1");
        let board = test_board();

        let first = book.add_selection(&user, &board, over()).await.unwrap();
        let entry_id = match first {
            SlipAdd::Added { entry_id } => entry_id,
            other => panic!("expected Added, got {other:?}"),
        };

        let second = book.add_selection(&user, &board, over()).await.unwrap();
        match second {
            SlipAdd::AlreadyInSlip { entry_id: existing } => assert_eq!(existing, entry_id),
            other => panic!("expected AlreadyInSlip, got {other:?}"),
        }

        assert_eq!(book.slip(&user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unquoted_selections_are_rejected() {
        let book = book();
        let user = UserId::new("user-1");
        let mut board = test_board();
        board.total = None;

        let err = book.add_selection(&user, &board, over()).await.unwrap_err();
        assert!(err.to_string().contains("not quoted"));
        assert!(book.slip(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn placement_splits_the_stake_evenly() {
        let book = book();
        let user = UserId::new("user-1");
        funded_slip(&book, &user).await;

        let receipt = book.place_bet(&user, dec!(20)).await.unwrap();

        assert_eq!(
            receipt.message,
            "Bet placed successfully! Total stake: $20.00"
        );
        assert_eq!(receipt.bets.len(), 2);
        for bet in &receipt.bets {
            assert_eq!(bet.stake(), dec!(10));
            assert!(bet.status().is_pending());
        }

        // +150 on $10 returns $25.00; -120 returns $18.33 when displayed.
        assert_eq!(receipt.bets[0].potential_payout(), dec!(25.00));
        assert_eq!(format_usd(receipt.bets[1].potential_payout()), "$18.33");

        let wallet = book.wallet(&user).await.unwrap();
        assert_eq!(wallet.balance(), dec!(980));
        assert_eq!(wallet.pending_bets(), dec!(20));

        assert!(book.slip(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn placement_validation_order_is_slip_stake_balance() {
        let book = book();
        let user = UserId::new("user-1");

        // Empty slip wins over a bad stake.
        let err = book.place_bet(&user, dec!(0)).await.unwrap_err();
        assert_eq!(err.to_string(), "bet slip is empty");

        book.deposit(&user, dec!(5)).await.unwrap();
        let board = test_board();
        book.add_selection(&user, &board, over()).await.unwrap();

        let err = book.place_bet(&user, dec!(0)).await.unwrap_err();
        assert!(err.to_string().contains("stake must be greater than 0"));

        let err = book.place_bet(&user, dec!(10)).await.unwrap_err();
        assert!(err.to_string().contains("insufficient funds"));

        // Nothing moved while placement kept failing.
        let wallet = book.wallet(&user).await.unwrap();
        assert_eq!(wallet.balance(), dec!(5));
        assert_eq!(wallet.pending_bets(), dec!(0));
        assert_eq!(book.slip(&user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancelling_a_pending_bet_refunds_the_stake() {
        let book = book();
        let user = UserId::new("user-1");
        funded_slip(&book, &user).await;
        let receipt = book.place_bet(&user, dec!(20)).await.unwrap();
        let bet_id = receipt.bets[0].id();

        let cancelled = book.cancel_bet(&user, bet_id).await.unwrap();
        assert_eq!(cancelled.status(), BetStatus::Cancelled);

        let wallet = book.wallet(&user).await.unwrap();
        assert_eq!(wallet.balance(), dec!(990));
        assert_eq!(wallet.pending_bets(), dec!(10));

        let err = book.cancel_bet(&user, bet_id).await.unwrap_err();
        assert!(err.to_string().contains("already settled as cancelled"));
    }

    #[tokio::test]
    async fn cancelling_an_unknown_bet_reports_not_found() {
        let book = book();
        let user = UserId::new("user-1");

        let err = book.cancel_bet(&user, BetId::generate()).await.unwrap_err();
        assert!(err.to_string().contains("bet not found"));
    }

    #[tokio::test]
    async fn settlement_pays_winners_and_burns_losers() {
        let book = book();
        let user = UserId::new("user-1");
        funded_slip(&book, &user).await;
        book.place_bet(&user, dec!(20)).await.unwrap();

        // Arsenal win 3-1: away moneyline loses, over 3.0 wins.
        let summary = book
            .settle_fixture(&FixtureResult::new("fix-1", 3, 1))
            .await
            .unwrap();

        assert_eq!(summary.settled, 2);
        assert_eq!(summary.won, 1);
        assert_eq!(summary.lost, 1);
        assert_eq!(summary.refunded, 0);
        assert_eq!(format_usd(summary.total_paid_out), "$18.33");

        let wallet = book.wallet(&user).await.unwrap();
        assert_eq!(format_usd(wallet.balance()), "$998.33");
        assert_eq!(wallet.pending_bets(), dec!(0));
        assert_eq!(format_usd(wallet.total_won()), "$18.33");
        assert_eq!(wallet.total_lost(), dec!(10));

        let pending = book.history(&user, Some(BetStatus::Pending)).await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn settlement_refunds_pushes() {
        let book = book();
        let user = UserId::new("user-1");
        funded_slip(&book, &user).await;
        book.place_bet(&user, dec!(20)).await.unwrap();

        // 2-1 lands exactly on the 3.0 total: push. Away moneyline loses.
        let summary = book
            .settle_fixture(&FixtureResult::new("fix-1", 2, 1))
            .await
            .unwrap();

        assert_eq!(summary.refunded, 1);
        assert_eq!(summary.lost, 1);
        assert_eq!(summary.total_paid_out, dec!(0));

        let wallet = book.wallet(&user).await.unwrap();
        assert_eq!(wallet.balance(), dec!(990));
        assert_eq!(wallet.pending_bets(), dec!(0));
        assert_eq!(wallet.total_lost(), dec!(10));
    }

    #[tokio::test]
    async fn settling_a_fixture_without_bets_is_a_no_op() {
        let book = book();
        let summary = book
            .settle_fixture(&FixtureResult::new("nothing-here", 1, 0))
            .await
            .unwrap();
        assert_eq!(summary.settled, 0);
        assert_eq!(summary.skipped, 0);
    }

    #[tokio::test]
    async fn history_filters_by_status() {
        let book = book();
        let user = UserId::new("user-1");
        funded_slip(&book, &user).await;
        let receipt = book.place_bet(&user, dec!(20)).await.unwrap();
        book.cancel_bet(&user, receipt.bets[0].id()).await.unwrap();

        let all = book.history(&user, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let cancelled = book
            .history(&user, Some(BetStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id(), receipt.bets[0].id());
    }
}
