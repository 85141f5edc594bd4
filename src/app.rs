//! Watch mode: periodically refresh the stored odds board from the feed.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::feed::OddsCatalog;
use crate::store::db::{create_pool, run_migrations};
use crate::store::{CatalogStore, SqliteStore};

/// Main application struct.
pub struct App;

impl App {
    /// Run the board watcher until the task is cancelled.
    ///
    /// Fetches the odds board every `poll_interval_secs` and replaces the
    /// stored snapshot. Feed and storage failures are logged and the loop
    /// keeps going, so a flaky upstream never kills watch mode.
    pub async fn run(config: Config, mock: bool) -> crate::error::Result<()> {
        let pool = create_pool(&config.store.database_url)?;
        run_migrations(&pool)?;
        let store = Arc::new(SqliteStore::new(pool));

        let catalog = if mock {
            OddsCatalog::mock_only()
        } else {
            OddsCatalog::from_config(&config.feed)
        };

        info!(
            sport = %config.feed.sport,
            interval_secs = config.feed.poll_interval_secs,
            "Watching the odds board"
        );

        let mut ticker =
            tokio::time::interval(Duration::from_secs(config.feed.poll_interval_secs));
        loop {
            ticker.tick().await;

            let fetched = match catalog.fetch(&config.feed.sport).await {
                Ok(fetched) => fetched,
                Err(err) => {
                    warn!(error = %err, "Board refresh failed, keeping previous snapshot");
                    continue;
                }
            };

            match store.replace_odds(&fetched.odds).await {
                Ok(()) => {
                    info!(
                        fixtures = fetched.odds.len(),
                        source = fetched.source,
                        "Odds board refreshed"
                    );
                }
                Err(err) => {
                    error!(error = %err, "Failed to persist the odds board");
                }
            }
        }
    }
}
