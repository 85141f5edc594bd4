use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stakehouse::ledger::Sportsbook;
use stakehouse::store::db::{create_pool, run_migrations, DbPool};
use stakehouse::store::SqliteStore;

/// Temporary SQLite database for integration tests.
///
/// The file lives in the OS temp directory under a unique name and is
/// removed on drop.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("stakehouse-{name}-{nanos}.db"));

        let url = format!("sqlite://{}", path.display());
        let pool = create_pool(&url).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        // WAL mode improves concurrent writer behavior in tests.
        {
            let mut conn = pool.get().expect("get sqlite connection");
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(&mut conn)
                .expect("enable WAL mode");
        }

        Self { path, pool }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Open a store over this database.
    pub fn store(&self) -> Arc<SqliteStore> {
        Arc::new(SqliteStore::new(self.pool.clone()))
    }

    /// Open a ledger over this database with the given wallet seed.
    pub fn sportsbook(&self, starting_balance: Decimal) -> Sportsbook<SqliteStore> {
        Sportsbook::new(self.store(), "USD", starting_balance)
    }

    /// Open a ledger over this database seeding empty wallets.
    pub fn sportsbook_unfunded(&self) -> Sportsbook<SqliteStore> {
        self.sportsbook(dec!(0))
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
