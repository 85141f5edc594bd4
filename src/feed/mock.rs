//! Built-in mock odds board for offline use.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use super::OddsFeed;
use crate::domain::{AmericanOdds, BettingOdds, FixtureId, MoneylineOdds, SpreadOdds, TotalOdds};
use crate::error::Result;

/// Serves a fixed three-fixture board with fresh start times, regardless of
/// the requested sport. Used when no live feed is reachable and by `--mock`.
#[derive(Debug, Default)]
pub struct MockFeed;

impl MockFeed {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OddsFeed for MockFeed {
    async fn fetch(&self, _sport: &str) -> Result<Vec<BettingOdds>> {
        let now = Utc::now();

        Ok(vec![
            BettingOdds {
                fixture_id: FixtureId::new("1"),
                home_team: "Manchester United".into(),
                away_team: "Liverpool".into(),
                league: "Premier League".into(),
                start_time: now + Duration::hours(1),
                moneyline: Some(MoneylineOdds {
                    home: AmericanOdds::new(-120)?,
                    away: AmericanOdds::new(150)?,
                    draw: Some(AmericanOdds::new(280)?),
                }),
                spread: Some(SpreadOdds {
                    home: AmericanOdds::new(-110)?,
                    away: AmericanOdds::new(-110)?,
                    line: dec!(-1.5),
                }),
                total: Some(TotalOdds {
                    over: AmericanOdds::new(-110)?,
                    under: AmericanOdds::new(-110)?,
                    line: dec!(2.5),
                }),
                last_updated: now,
            },
            BettingOdds {
                fixture_id: FixtureId::new("2"),
                home_team: "Barcelona".into(),
                away_team: "Real Madrid".into(),
                league: "La Liga".into(),
                start_time: now + Duration::hours(2),
                moneyline: Some(MoneylineOdds {
                    home: AmericanOdds::new(130)?,
                    away: AmericanOdds::new(-140)?,
                    draw: Some(AmericanOdds::new(250)?),
                }),
                spread: Some(SpreadOdds {
                    home: AmericanOdds::new(-110)?,
                    away: AmericanOdds::new(-110)?,
                    line: dec!(0.5),
                }),
                total: Some(TotalOdds {
                    over: AmericanOdds::new(-105)?,
                    under: AmericanOdds::new(-115)?,
                    line: dec!(3.0),
                }),
                last_updated: now,
            },
            BettingOdds {
                fixture_id: FixtureId::new("3"),
                home_team: "Lakers".into(),
                away_team: "Warriors".into(),
                league: "NBA".into(),
                start_time: now + Duration::hours(3),
                moneyline: Some(MoneylineOdds {
                    home: AmericanOdds::new(-110)?,
                    away: AmericanOdds::new(-110)?,
                    draw: None,
                }),
                spread: Some(SpreadOdds {
                    home: AmericanOdds::new(-110)?,
                    away: AmericanOdds::new(-110)?,
                    line: dec!(-4.5),
                }),
                total: Some(TotalOdds {
                    over: AmericanOdds::new(-110)?,
                    under: AmericanOdds::new(-110)?,
                    line: dec!(225.5),
                }),
                last_updated: now,
            },
        ])
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}
