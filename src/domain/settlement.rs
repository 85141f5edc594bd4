//! Grading selections against a final score.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::FixtureId;
use crate::domain::selection::{MoneylinePick, Selection, TeamSide, TotalSide};

/// Final score of a completed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureResult {
    pub fixture_id: FixtureId,
    pub home_score: u32,
    pub away_score: u32,
}

impl FixtureResult {
    #[must_use]
    pub fn new(fixture_id: impl Into<FixtureId>, home_score: u32, away_score: u32) -> Self {
        Self {
            fixture_id: fixture_id.into(),
            home_score,
            away_score,
        }
    }

    /// Home margin of victory; negative when the away side won.
    #[must_use]
    pub fn margin(&self) -> Decimal {
        Decimal::from(self.home_score) - Decimal::from(self.away_score)
    }

    /// Combined points scored.
    #[must_use]
    pub fn combined(&self) -> Decimal {
        Decimal::from(self.home_score) + Decimal::from(self.away_score)
    }
}

/// How a single selection graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetOutcome {
    Won,
    Lost,
    /// Landed exactly on the line; the stake is refunded.
    Push,
    /// Cannot be graded from a score alone (prop markets).
    Unresolved,
}

/// Grade one selection against the final score.
///
/// Spreads grade on `team margin + team line`: strictly positive covers,
/// strictly negative does not, exactly zero pushes. Totals push when the
/// combined score lands on the line. Whole-point lines can push; half-point
/// lines never do.
#[must_use]
pub fn resolve(selection: &Selection, result: &FixtureResult) -> BetOutcome {
    match selection {
        Selection::Moneyline { pick, .. } => {
            let margin = result.margin();
            let won = match pick {
                MoneylinePick::Home => margin > Decimal::ZERO,
                MoneylinePick::Away => margin < Decimal::ZERO,
                MoneylinePick::Draw => margin == Decimal::ZERO,
            };
            if won {
                BetOutcome::Won
            } else {
                BetOutcome::Lost
            }
        }
        Selection::Spread { side, line, .. } => {
            let team_margin = match side {
                TeamSide::Home => result.margin(),
                TeamSide::Away => -result.margin(),
            };
            grade_against_zero(team_margin + line)
        }
        Selection::Total { side, line } => {
            let over_by = result.combined() - line;
            match side {
                TotalSide::Over => grade_against_zero(over_by),
                TotalSide::Under => grade_against_zero(-over_by),
            }
        }
        Selection::Props { .. } => BetOutcome::Unresolved,
    }
}

fn grade_against_zero(edge: Decimal) -> BetOutcome {
    if edge > Decimal::ZERO {
        BetOutcome::Won
    } else if edge < Decimal::ZERO {
        BetOutcome::Lost
    } else {
        BetOutcome::Push
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ml(pick: MoneylinePick) -> Selection {
        Selection::Moneyline {
            pick,
            team: "Someone".into(),
        }
    }

    fn spread(side: TeamSide, line: Decimal) -> Selection {
        Selection::Spread {
            side,
            team: "Someone".into(),
            line,
        }
    }

    fn total(side: TotalSide, line: Decimal) -> Selection {
        Selection::Total { side, line }
    }

    #[test]
    fn moneyline_grades_by_winner() {
        let result = FixtureResult::new("1", 2, 1);
        assert_eq!(resolve(&ml(MoneylinePick::Home), &result), BetOutcome::Won);
        assert_eq!(resolve(&ml(MoneylinePick::Away), &result), BetOutcome::Lost);
        assert_eq!(resolve(&ml(MoneylinePick::Draw), &result), BetOutcome::Lost);
    }

    #[test]
    fn moneyline_draw_wins_on_level_score() {
        let result = FixtureResult::new("1", 1, 1);
        assert_eq!(resolve(&ml(MoneylinePick::Draw), &result), BetOutcome::Won);
        assert_eq!(resolve(&ml(MoneylinePick::Home), &result), BetOutcome::Lost);
    }

    #[test]
    fn half_point_spread_never_pushes() {
        // Home -1.5: must win by 2+.
        let covered = FixtureResult::new("1", 3, 1);
        let missed = FixtureResult::new("1", 2, 1);
        assert_eq!(
            resolve(&spread(TeamSide::Home, dec!(-1.5)), &covered),
            BetOutcome::Won
        );
        assert_eq!(
            resolve(&spread(TeamSide::Home, dec!(-1.5)), &missed),
            BetOutcome::Lost
        );
    }

    #[test]
    fn whole_point_spread_pushes_on_the_number() {
        // Away +3 with a 3-point home win lands exactly on the line.
        let result = FixtureResult::new("3", 110, 107);
        assert_eq!(
            resolve(&spread(TeamSide::Away, dec!(3)), &result),
            BetOutcome::Push
        );
        assert_eq!(
            resolve(&spread(TeamSide::Home, dec!(-3)), &result),
            BetOutcome::Push
        );
    }

    #[test]
    fn underdog_covers_by_losing_small() {
        // Away +4.5, home wins by 3: dog covers.
        let result = FixtureResult::new("3", 110, 107);
        assert_eq!(
            resolve(&spread(TeamSide::Away, dec!(4.5)), &result),
            BetOutcome::Won
        );
    }

    #[test]
    fn totals_grade_on_combined_score() {
        let result = FixtureResult::new("1", 2, 1);
        assert_eq!(
            resolve(&total(TotalSide::Over, dec!(2.5)), &result),
            BetOutcome::Won
        );
        assert_eq!(
            resolve(&total(TotalSide::Under, dec!(2.5)), &result),
            BetOutcome::Lost
        );
    }

    #[test]
    fn totals_push_on_exact_line() {
        let result = FixtureResult::new("2", 2, 1);
        assert_eq!(
            resolve(&total(TotalSide::Over, dec!(3)), &result),
            BetOutcome::Push
        );
        assert_eq!(
            resolve(&total(TotalSide::Under, dec!(3)), &result),
            BetOutcome::Push
        );
    }

    #[test]
    fn props_cannot_be_graded_from_a_score() {
        let sel = Selection::Props {
            label: "First scorer".into(),
        };
        assert_eq!(
            resolve(&sel, &FixtureResult::new("1", 2, 1)),
            BetOutcome::Unresolved
        );
    }
}
