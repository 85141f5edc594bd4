//! HTTP client for The Odds API v4.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::dto::EventDto;
use super::OddsFeed;
use crate::config::FeedConfig;
use crate::domain::BettingOdds;
use crate::error::{FeedError, Result};

/// Client for `https://the-odds-api.com`.
///
/// The API key travels as a query parameter, so request URLs are never
/// logged.
pub struct TheOddsApiClient {
    http: HttpClient,
    base_url: String,
    regions: String,
    markets: String,
    api_key: Option<String>,
}

impl TheOddsApiClient {
    #[must_use]
    pub fn from_config(config: &FeedConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.api_base_url.clone(),
            regions: config.regions.clone(),
            markets: config.markets.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn odds_url(&self, sport: &str, api_key: &str) -> String {
        format!(
            "{}/v4/sports/{}/odds/?apiKey={}&regions={}&markets={}&oddsFormat=american",
            self.base_url, sport, api_key, self.regions, self.markets
        )
    }
}

#[async_trait]
impl OddsFeed for TheOddsApiClient {
    async fn fetch(&self, sport: &str) -> Result<Vec<BettingOdds>> {
        let api_key = self.api_key.as_deref().ok_or(FeedError::MissingApiKey {
            provider: "the-odds-api",
        })?;

        info!(sport, base_url = %self.base_url, "Fetching odds");

        let response = self.http.get(self.odds_url(sport, api_key)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let events: Vec<EventDto> = response.json().await?;
        let now = Utc::now();
        let board: Vec<BettingOdds> = events
            .into_iter()
            .map(|event| event.into_board_entry(now))
            .collect();

        debug!(count = board.len(), "Fetched odds board");
        Ok(board)
    }

    fn source_name(&self) -> &'static str {
        "the-odds-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> FeedConfig {
        FeedConfig {
            api_key: key.map(str::to_owned),
            ..FeedConfig::default()
        }
    }

    #[test]
    fn url_carries_query_parameters() {
        let client = TheOddsApiClient::from_config(&config_with_key(Some("k3y")));
        let url = client.odds_url("soccer_epl", "k3y");
        assert_eq!(
            url,
            "https://api.the-odds-api.com/v4/sports/soccer_epl/odds/\
             ?apiKey=k3y&regions=us&markets=h2h,spreads,totals&oddsFormat=american"
        );
    }

    #[tokio::test]
    async fn missing_api_key_is_reported_before_any_request() {
        let client = TheOddsApiClient::from_config(&config_with_key(None));
        let err = client.fetch("soccer_epl").await.unwrap_err();
        assert!(err.to_string().contains("no API key configured"));
    }
}
