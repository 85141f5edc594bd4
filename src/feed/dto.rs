//! Wire types for The Odds API v4 and their reduction to board entries.
//!
//! The API quotes every bookmaker separately; we keep only the best (numerically
//! greatest) American price per side. Unknown fields are ignored so upstream
//! additions do not break parsing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{AmericanOdds, BettingOdds, FixtureId, MoneylineOdds, SpreadOdds, TotalOdds};

/// One event (fixture) as returned by `/v4/sports/{sport}/odds`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub sport_title: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookmakerDto {
    pub title: String,
    #[serde(default)]
    pub markets: Vec<MarketDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDto {
    /// Market key: `h2h`, `spreads`, or `totals`.
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeDto {
    pub name: String,
    /// American price. Parsed as float because some books serialize `150.0`.
    pub price: f64,
    /// Handicap or total line, present for spreads and totals.
    pub point: Option<Decimal>,
}

impl EventDto {
    /// Reduce this event's bookmaker quotes to a single board entry holding
    /// the best available price per side.
    ///
    /// A market appears only when both of its required sides are quoted by at
    /// least one book; zero prices are treated as unquoted. The spread line
    /// follows the book holding the best home price (signed home handicap);
    /// the total line follows the book holding the best over price.
    #[must_use]
    pub fn into_board_entry(self, now: DateTime<Utc>) -> BettingOdds {
        let mut ml_home: Option<AmericanOdds> = None;
        let mut ml_away: Option<AmericanOdds> = None;
        let mut ml_draw: Option<AmericanOdds> = None;
        let mut spread_home: Option<AmericanOdds> = None;
        let mut spread_away: Option<AmericanOdds> = None;
        let mut spread_line: Option<Decimal> = None;
        let mut total_over: Option<AmericanOdds> = None;
        let mut total_under: Option<AmericanOdds> = None;
        let mut total_line: Option<Decimal> = None;

        for bookmaker in &self.bookmakers {
            for market in &bookmaker.markets {
                match market.key.as_str() {
                    "h2h" => {
                        let home = team_outcome(&market.outcomes, &self.home_team)
                            .and_then(|o| to_price(o.price));
                        let away = team_outcome(&market.outcomes, &self.away_team)
                            .and_then(|o| to_price(o.price));
                        let (Some(home), Some(away)) = (home, away) else {
                            continue;
                        };
                        improve(&mut ml_home, home);
                        improve(&mut ml_away, away);
                        if let Some(draw) =
                            draw_outcome(&market.outcomes).and_then(|o| to_price(o.price))
                        {
                            improve(&mut ml_draw, draw);
                        }
                    }
                    "spreads" => {
                        let home = team_outcome(&market.outcomes, &self.home_team);
                        let away = team_outcome(&market.outcomes, &self.away_team);
                        let (Some(home), Some(away)) = (home, away) else {
                            continue;
                        };
                        let (Some(home_price), Some(away_price), Some(line)) =
                            (to_price(home.price), to_price(away.price), home.point)
                        else {
                            continue;
                        };
                        if improve(&mut spread_home, home_price) {
                            spread_line = Some(line);
                        }
                        improve(&mut spread_away, away_price);
                    }
                    "totals" => {
                        let over = named_outcome(&market.outcomes, "over");
                        let under = named_outcome(&market.outcomes, "under");
                        let (Some(over), Some(under)) = (over, under) else {
                            continue;
                        };
                        let (Some(over_price), Some(under_price), Some(line)) =
                            (to_price(over.price), to_price(under.price), over.point)
                        else {
                            continue;
                        };
                        if improve(&mut total_over, over_price) {
                            total_line = Some(line);
                        }
                        improve(&mut total_under, under_price);
                    }
                    _ => {}
                }
            }
        }

        let moneyline = match (ml_home, ml_away) {
            (Some(home), Some(away)) => Some(MoneylineOdds {
                home,
                away,
                draw: ml_draw,
            }),
            _ => None,
        };
        let spread = match (spread_home, spread_away, spread_line) {
            (Some(home), Some(away), Some(line)) => Some(SpreadOdds { home, away, line }),
            _ => None,
        };
        let total = match (total_over, total_under, total_line) {
            (Some(over), Some(under), Some(line)) => Some(TotalOdds { over, under, line }),
            _ => None,
        };

        BettingOdds {
            fixture_id: FixtureId::new(self.id),
            home_team: self.home_team,
            away_team: self.away_team,
            league: self.sport_title,
            start_time: self.commence_time,
            moneyline,
            spread,
            total,
            last_updated: now,
        }
    }
}

/// Replace `slot` when `candidate` is a strictly better price. Returns whether
/// the slot changed, so line fields can travel with the winning book.
fn improve(slot: &mut Option<AmericanOdds>, candidate: AmericanOdds) -> bool {
    let better = slot.map_or(true, |current| candidate.value() > current.value());
    if better {
        *slot = Some(candidate);
    }
    better
}

fn to_price(raw: f64) -> Option<AmericanOdds> {
    #[allow(clippy::cast_possible_truncation)]
    AmericanOdds::new(raw.round() as i32).ok()
}

/// Match an outcome to a team by exact name, falling back to the team's
/// leading word (books abbreviate, e.g. "Manchester Utd").
fn team_outcome<'a>(outcomes: &'a [OutcomeDto], team: &str) -> Option<&'a OutcomeDto> {
    let first_word = team.split_whitespace().next().unwrap_or(team);
    outcomes
        .iter()
        .find(|o| o.name == team || o.name.contains(first_word))
}

fn draw_outcome(outcomes: &[OutcomeDto]) -> Option<&OutcomeDto> {
    outcomes.iter().find(|o| {
        let name = o.name.to_lowercase();
        name.contains("draw") || name.contains("tie")
    })
}

fn named_outcome<'a>(outcomes: &'a [OutcomeDto], keyword: &str) -> Option<&'a OutcomeDto> {
    outcomes
        .iter()
        .find(|o| o.name.to_lowercase().contains(keyword))
}
