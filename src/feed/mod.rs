//! Odds ingestion: live feed client, mock feed, and the catalog that
//! arbitrates between them.

mod client;
mod dto;
mod mock;

pub use client::TheOddsApiClient;
pub use dto::{BookmakerDto, EventDto, MarketDto, OutcomeDto};
pub use mock::MockFeed;

use async_trait::async_trait;
use tracing::warn;

use crate::config::FeedConfig;
use crate::domain::BettingOdds;
use crate::error::Result;

/// A source of betting odds for a sport.
#[async_trait]
pub trait OddsFeed: Send + Sync {
    /// Fetch the current board for `sport`, best price per side.
    async fn fetch(&self, sport: &str) -> Result<Vec<BettingOdds>>;

    /// Human-readable source name for logs and status output.
    fn source_name(&self) -> &'static str;
}

/// A fetched board together with the source that produced it.
#[derive(Debug)]
pub struct FetchedOdds {
    pub odds: Vec<BettingOdds>,
    pub source: &'static str,
}

/// Arbitrates between the live feed and the built-in mock board.
///
/// When the primary feed fails (network trouble, missing API key, bad
/// payload), the catalog logs the failure and serves the mock board instead,
/// so the rest of the system keeps working offline.
pub struct OddsCatalog {
    primary: Option<Box<dyn OddsFeed>>,
    fallback: Box<dyn OddsFeed>,
}

impl OddsCatalog {
    #[must_use]
    pub fn from_config(config: &FeedConfig) -> Self {
        Self {
            primary: Some(Box::new(TheOddsApiClient::from_config(config))),
            fallback: Box::new(MockFeed::new()),
        }
    }

    /// A catalog that only ever serves the mock board.
    #[must_use]
    pub fn mock_only() -> Self {
        Self {
            primary: None,
            fallback: Box::new(MockFeed::new()),
        }
    }

    /// Assemble a catalog from explicit sources.
    #[must_use]
    pub fn with_sources(primary: Option<Box<dyn OddsFeed>>, fallback: Box<dyn OddsFeed>) -> Self {
        Self { primary, fallback }
    }

    pub async fn fetch(&self, sport: &str) -> Result<FetchedOdds> {
        if let Some(primary) = &self.primary {
            match primary.fetch(sport).await {
                Ok(odds) => {
                    return Ok(FetchedOdds {
                        odds,
                        source: primary.source_name(),
                    })
                }
                Err(err) => {
                    warn!(
                        source = primary.source_name(),
                        error = %err,
                        "Primary odds feed failed, serving mock board"
                    );
                }
            }
        }

        let odds = self.fallback.fetch(sport).await?;
        Ok(FetchedOdds {
            odds,
            source: self.fallback.source_name(),
        })
    }
}
