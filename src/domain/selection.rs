//! Typed market selections.
//!
//! A [`Selection`] pins down exactly which outcome a bet is on, carrying
//! enough context (team names, lines) to render the label a bettor saw and to
//! grade the bet from a final score without consulting the odds board again.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::LedgerError;

/// Market category a bet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Moneyline,
    Spread,
    Total,
    Props,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Moneyline => "moneyline",
            Self::Spread => "spread",
            Self::Total => "total",
            Self::Props => "props",
        };
        write!(f, "{label}")
    }
}

impl FromStr for BetType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moneyline" => Ok(Self::Moneyline),
            "spread" => Ok(Self::Spread),
            "total" => Ok(Self::Total),
            "props" => Ok(Self::Props),
            other => Err(LedgerError::invalid(
                "bet type",
                format!("unknown bet type '{other}'"),
            )),
        }
    }
}

/// Which team a two-way selection backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

/// Moneyline outcome, including the draw for three-way markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneylinePick {
    Home,
    Away,
    Draw,
}

/// Over/under side of a totals market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalSide {
    Over,
    Under,
}

/// A concrete outcome a bettor can back.
///
/// `Spread::line` is signed for the chosen side: backing the home favorite at
/// -1.5 stores `-1.5`, backing the away dog stores `+1.5`. Equality over the
/// whole value is what makes slip entries distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "market", rename_all = "lowercase")]
pub enum Selection {
    Moneyline {
        pick: MoneylinePick,
        /// Display name of the backed team; unused for draws.
        team: String,
    },
    Spread {
        side: TeamSide,
        team: String,
        line: Decimal,
    },
    Total {
        side: TotalSide,
        line: Decimal,
    },
    Props {
        label: String,
    },
}

impl Selection {
    /// The market category this selection belongs to.
    #[must_use]
    pub fn bet_type(&self) -> BetType {
        match self {
            Self::Moneyline { .. } => BetType::Moneyline,
            Self::Spread { .. } => BetType::Spread,
            Self::Total { .. } => BetType::Total,
            Self::Props { .. } => BetType::Props,
        }
    }

    /// Human-readable label, matching what the odds board shows.
    ///
    /// Spreads render the signed line with an explicit `+` for the dog, e.g.
    /// `"Liverpool +1.5"`. Totals render as `"Over 2.5"` / `"Under 2.5"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Moneyline { pick, team } => match pick {
                MoneylinePick::Draw => "Draw".to_string(),
                _ => team.clone(),
            },
            Self::Spread { team, line, .. } => {
                if line.is_sign_negative() {
                    format!("{team} {line}")
                } else {
                    format!("{team} +{line}")
                }
            }
            Self::Total { side, line } => match side {
                TotalSide::Over => format!("Over {line}"),
                TotalSide::Under => format!("Under {line}"),
            },
            Self::Props { label } => label.clone(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
