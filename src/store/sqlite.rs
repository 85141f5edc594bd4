//! SQLite store implementation using Diesel.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use rust_decimal::Decimal;

use super::db::model::{BetRow, DepositRow, OddsSnapshotRow, SlipRow, WalletRow};
use super::db::schema::{bets, deposits, odds_snapshots, slips, wallets};
use super::db::DbPool;
use super::{BetStore, CatalogStore, SlipStore, WalletStore};
use crate::domain::{
    AmericanOdds, Bet, BetSlip, BettingOdds, FixtureId, LedgerError, SlipEntry, TransactionId,
    UserId, Wallet,
};
use crate::error::{Error, Result};

type SqliteConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed store for wallets, bets, slips, and the odds board.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<SqliteConn> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    fn wallet_to_row(user: &UserId, wallet: &Wallet) -> WalletRow {
        WalletRow {
            user_id: user.to_string(),
            balance: wallet.balance().to_string(),
            currency: wallet.currency().to_string(),
            pending_bets: wallet.pending_bets().to_string(),
            total_won: wallet.total_won().to_string(),
            total_lost: wallet.total_lost().to_string(),
            updated_at: Utc::now().to_rfc3339(),
        }
    }

    fn wallet_from_row(row: WalletRow) -> Result<Wallet> {
        Ok(Wallet::from_parts(
            parse_decimal(&row.balance)?,
            row.currency,
            parse_decimal(&row.pending_bets)?,
            parse_decimal(&row.total_won)?,
            parse_decimal(&row.total_lost)?,
        ))
    }

    fn bet_to_row(bet: &Bet) -> Result<BetRow> {
        let selection =
            serde_json::to_string(bet.selection()).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(BetRow {
            id: bet.id().to_string(),
            user_id: bet.user_id().to_string(),
            fixture_id: bet.fixture_id().to_string(),
            bet_type: bet.bet_type().to_string(),
            selection,
            odds: bet.odds().value(),
            stake: bet.stake().to_string(),
            potential_payout: bet.potential_payout().to_string(),
            status: bet.status().to_string(),
            placed_at: bet.placed_at().to_rfc3339(),
            settled_at: bet.settled_at().map(|at| at.to_rfc3339()),
        })
    }

    fn bet_from_row(row: BetRow) -> Result<Bet> {
        let selection =
            serde_json::from_str(&row.selection).map_err(|e| Error::Parse(e.to_string()))?;
        let settled_at = row.settled_at.as_deref().map(parse_timestamp).transpose()?;
        Ok(Bet::new(
            row.id.parse().map_err(reject_row)?,
            UserId::from(row.user_id),
            FixtureId::from(row.fixture_id),
            row.bet_type.parse().map_err(reject_row)?,
            selection,
            AmericanOdds::new(row.odds).map_err(reject_row)?,
            parse_decimal(&row.stake)?,
            parse_decimal(&row.potential_payout)?,
            row.status.parse().map_err(reject_row)?,
            parse_timestamp(&row.placed_at)?,
            settled_at,
        ))
    }

    fn slip_to_row(user: &UserId, slip: &BetSlip) -> Result<SlipRow> {
        let entries =
            serde_json::to_string(slip.entries()).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(SlipRow {
            user_id: user.to_string(),
            entries,
            updated_at: Utc::now().to_rfc3339(),
        })
    }

    fn slip_from_row(row: SlipRow) -> Result<BetSlip> {
        let entries: Vec<SlipEntry> =
            serde_json::from_str(&row.entries).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(BetSlip::from_entries(entries))
    }

    fn odds_to_row(odds: &BettingOdds) -> Result<OddsSnapshotRow> {
        let payload = serde_json::to_string(odds).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(OddsSnapshotRow {
            fixture_id: odds.fixture_id.to_string(),
            payload,
            start_time: odds.start_time.to_rfc3339(),
            last_updated: odds.last_updated.to_rfc3339(),
        })
    }

    fn odds_from_row(row: OddsSnapshotRow) -> Result<BettingOdds> {
        serde_json::from_str(&row.payload).map_err(|e| Error::Parse(e.to_string()))
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|e: rust_decimal::Error| Error::Parse(e.to_string()))
}

fn reject_row(err: LedgerError) -> Error {
    Error::Parse(err.to_string())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::Parse(e.to_string()))?
        .with_timezone(&Utc))
}

impl WalletStore for SqliteStore {
    async fn load_wallet(&self, user: &UserId) -> Result<Option<Wallet>> {
        let mut conn = self.conn()?;

        let row: Option<WalletRow> = wallets::table
            .find(user.as_str())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::wallet_from_row).transpose()
    }

    async fn save_wallet(&self, user: &UserId, wallet: &Wallet) -> Result<()> {
        let row = Self::wallet_to_row(user, wallet);
        let mut conn = self.conn()?;

        diesel::replace_into(wallets::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn record_deposit(
        &self,
        txn: &TransactionId,
        user: &UserId,
        amount: Decimal,
    ) -> Result<bool> {
        let row = DepositRow {
            transaction_id: txn.to_string(),
            user_id: user.to_string(),
            amount: amount.to_string(),
            applied_at: Utc::now().to_rfc3339(),
        };
        let mut conn = self.conn()?;

        // Primary key conflict means the transaction was already applied.
        let inserted = diesel::insert_or_ignore_into(deposits::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(inserted > 0)
    }
}

impl BetStore for SqliteStore {
    async fn append_bets(&self, user: &UserId, placed: &[Bet]) -> Result<()> {
        debug_assert!(placed.iter().all(|b| b.user_id() == user));
        let rows = placed
            .iter()
            .map(Self::bet_to_row)
            .collect::<Result<Vec<_>>>()?;
        let mut conn = self.conn()?;

        diesel::insert_into(bets::table)
            .values(&rows)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn update_bet(&self, bet: &Bet) -> Result<bool> {
        let row = Self::bet_to_row(bet)?;
        let mut conn = self.conn()?;

        let updated = diesel::update(bets::table.find(&row.id))
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(updated > 0)
    }

    async fn bets_for_user(&self, user: &UserId) -> Result<Vec<Bet>> {
        let mut conn = self.conn()?;

        let rows: Vec<BetRow> = bets::table
            .filter(bets::user_id.eq(user.as_str()))
            .order(bets::placed_at.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::bet_from_row).collect()
    }

    async fn pending_bets_for_fixture(&self, fixture: &FixtureId) -> Result<Vec<Bet>> {
        let mut conn = self.conn()?;

        let rows: Vec<BetRow> = bets::table
            .filter(bets::fixture_id.eq(fixture.as_str()))
            .filter(bets::status.eq("pending"))
            .order(bets::placed_at.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::bet_from_row).collect()
    }
}

impl SlipStore for SqliteStore {
    async fn load_slip(&self, user: &UserId) -> Result<BetSlip> {
        let mut conn = self.conn()?;

        let row: Option<SlipRow> = slips::table
            .find(user.as_str())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::slip_from_row)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    async fn save_slip(&self, user: &UserId, slip: &BetSlip) -> Result<()> {
        let row = Self::slip_to_row(user, slip)?;
        let mut conn = self.conn()?;

        diesel::replace_into(slips::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}

impl CatalogStore for SqliteStore {
    async fn replace_odds(&self, odds: &[BettingOdds]) -> Result<()> {
        let rows = odds
            .iter()
            .map(Self::odds_to_row)
            .collect::<Result<Vec<_>>>()?;
        let mut conn = self.conn()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(odds_snapshots::table).execute(conn)?;
            diesel::insert_into(odds_snapshots::table)
                .values(&rows)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_odds(&self) -> Result<Vec<BettingOdds>> {
        let mut conn = self.conn()?;

        let rows: Vec<OddsSnapshotRow> = odds_snapshots::table
            .order(odds_snapshots::start_time.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::odds_from_row).collect()
    }

    async fn odds_for_fixture(&self, fixture: &FixtureId) -> Result<Option<BettingOdds>> {
        let mut conn = self.conn()?;

        let row: Option<OddsSnapshotRow> = odds_snapshots::table
            .find(fixture.as_str())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::odds_from_row).transpose()
    }
}
