//! American-odds prices and the per-fixture odds board entry.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::ids::FixtureId;
use crate::domain::selection::{MoneylinePick, Selection, TeamSide, TotalSide};
use crate::domain::LedgerError;

/// A quoted American price.
///
/// American odds are signed and never zero: positive is the profit on a $100
/// stake, negative is the stake required to profit $100. The zero case is
/// rejected at construction so downstream payout math never divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Validate and wrap a raw price.
    pub fn new(value: i32) -> Result<Self, LedgerError> {
        if value == 0 {
            return Err(LedgerError::invalid("odds", "American odds are never zero"));
        }
        Ok(Self(value))
    }

    /// The raw signed price.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Convert to European decimal odds (stake multiplier including stake).
    ///
    /// `+150` becomes `2.5`, `-120` becomes `1.8333...`.
    #[must_use]
    pub fn to_decimal_odds(self) -> Decimal {
        if self.0 > 0 {
            Decimal::from(self.0) / dec!(100) + Decimal::ONE
        } else {
            dec!(100) / Decimal::from(self.0.abs()) + Decimal::ONE
        }
    }
}

impl fmt::Display for AmericanOdds {
    /// Sportsbook convention: positive prices carry an explicit `+`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = LedgerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

/// Moneyline (match winner) prices. `draw` is only quoted for three-way
/// markets such as soccer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneylineOdds {
    pub home: AmericanOdds,
    pub away: AmericanOdds,
    pub draw: Option<AmericanOdds>,
}

/// Point-spread prices. `line` is the home team's signed handicap; the away
/// team implicitly takes the negated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadOdds {
    pub home: AmericanOdds,
    pub away: AmericanOdds,
    pub line: Decimal,
}

/// Totals (over/under) prices on the combined final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalOdds {
    pub over: AmericanOdds,
    pub under: AmericanOdds,
    pub line: Decimal,
}

/// One fixture's entry on the odds board.
///
/// Markets are optional: a feed may quote any subset for a given fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingOdds {
    pub fixture_id: FixtureId,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub start_time: DateTime<Utc>,
    pub moneyline: Option<MoneylineOdds>,
    pub spread: Option<SpreadOdds>,
    pub total: Option<TotalOdds>,
    pub last_updated: DateTime<Utc>,
}

impl BettingOdds {
    /// Resolve the currently quoted price for a selection on this fixture.
    ///
    /// Returns `None` when the market (or the draw price) is not quoted.
    #[must_use]
    pub fn price_for(&self, selection: &Selection) -> Option<AmericanOdds> {
        match selection {
            Selection::Moneyline { pick, .. } => {
                let ml = self.moneyline.as_ref()?;
                match pick {
                    MoneylinePick::Home => Some(ml.home),
                    MoneylinePick::Away => Some(ml.away),
                    MoneylinePick::Draw => ml.draw,
                }
            }
            Selection::Spread { side, .. } => {
                let spread = self.spread.as_ref()?;
                match side {
                    TeamSide::Home => Some(spread.home),
                    TeamSide::Away => Some(spread.away),
                }
            }
            Selection::Total { side, .. } => {
                let total = self.total.as_ref()?;
                match side {
                    TotalSide::Over => Some(total.over),
                    TotalSide::Under => Some(total.under),
                }
            }
            Selection::Props { .. } => None,
        }
    }

    /// "Away @ Home" matchup label used in tables and receipts.
    #[must_use]
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}
