use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use stakehouse::domain::{
    AmericanOdds, BettingOdds, FixtureId, MoneylineOdds, MoneylinePick, Selection, SpreadOdds,
    TeamSide, TotalOdds, TotalSide,
};

pub fn odds(value: i32) -> AmericanOdds {
    AmericanOdds::new(value).expect("non-zero odds")
}

/// Three-market soccer fixture: moneyline -120 / +150 / draw +280, home
/// spread -1.5 at -110 both ways, total 3.0 at over -120 / under +100.
pub fn soccer_board(fixture: &str, home: &str, away: &str) -> BettingOdds {
    let now = Utc::now();
    BettingOdds {
        fixture_id: FixtureId::new(fixture),
        home_team: home.to_string(),
        away_team: away.to_string(),
        league: "Premier League".to_string(),
        start_time: now + Duration::hours(1),
        moneyline: Some(MoneylineOdds {
            home: odds(-120),
            away: odds(150),
            draw: Some(odds(280)),
        }),
        spread: Some(SpreadOdds {
            home: odds(-110),
            away: odds(-110),
            line: dec!(-1.5),
        }),
        total: Some(TotalOdds {
            over: odds(-120),
            under: odds(100),
            line: dec!(3.0),
        }),
        last_updated: now,
    }
}

pub fn home_ml(board: &BettingOdds) -> Selection {
    Selection::Moneyline {
        pick: MoneylinePick::Home,
        team: board.home_team.clone(),
    }
}

pub fn away_ml(board: &BettingOdds) -> Selection {
    Selection::Moneyline {
        pick: MoneylinePick::Away,
        team: board.away_team.clone(),
    }
}

pub fn draw_ml() -> Selection {
    Selection::Moneyline {
        pick: MoneylinePick::Draw,
        team: String::new(),
    }
}

pub fn home_spread(board: &BettingOdds) -> Selection {
    let spread = board.spread.as_ref().expect("board quotes a spread");
    Selection::Spread {
        side: TeamSide::Home,
        team: board.home_team.clone(),
        line: spread.line,
    }
}

pub fn away_spread(board: &BettingOdds) -> Selection {
    let spread = board.spread.as_ref().expect("board quotes a spread");
    Selection::Spread {
        side: TeamSide::Away,
        team: board.away_team.clone(),
        line: -spread.line,
    }
}

pub fn over(board: &BettingOdds) -> Selection {
    let total = board.total.as_ref().expect("board quotes a total");
    Selection::Total {
        side: TotalSide::Over,
        line: total.line,
    }
}

pub fn under(board: &BettingOdds) -> Selection {
    let total = board.total.as_ref().expect("board quotes a total");
    Selection::Total {
        side: TotalSide::Under,
        line: total.line,
    }
}
