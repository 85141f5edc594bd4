//! Database model types for Diesel ORM.
//!
//! Money columns are TEXT holding `Decimal` renderings, never floats, so a
//! stored amount reloads value-identical. Timestamps are RFC 3339 TEXT.

use diesel::prelude::*;

use super::schema::{bets, deposits, odds_snapshots, slips, wallets};

/// Database row for a user wallet.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletRow {
    pub user_id: String,
    pub balance: String,
    pub currency: String,
    pub pending_bets: String,
    pub total_won: String,
    pub total_lost: String,
    pub updated_at: String,
}

/// Database row for a placed bet.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = bets)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetRow {
    pub id: String,
    pub user_id: String,
    pub fixture_id: String,
    pub bet_type: String,
    pub selection: String,
    pub odds: i32,
    pub stake: String,
    pub potential_payout: String,
    pub status: String,
    pub placed_at: String,
    pub settled_at: Option<String>,
}

/// Database row for a user's working slip (entries as a JSON array).
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = slips)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SlipRow {
    pub user_id: String,
    pub entries: String,
    pub updated_at: String,
}

/// Database row for one fixture's odds board entry (payload as JSON).
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = odds_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OddsSnapshotRow {
    pub fixture_id: String,
    pub payload: String,
    pub start_time: String,
    pub last_updated: String,
}

/// Database row for an applied webhook deposit (idempotency record).
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = deposits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepositRow {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: String,
    pub applied_at: String,
}
