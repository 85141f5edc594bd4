//! Handler for the `odds` command.

use tabled::{Table, Tabled};

use crate::cli::{open_store, output, OddsArgs};
use crate::config::Config;
use crate::domain::BettingOdds;
use crate::error::Result;
use crate::feed::OddsCatalog;
use crate::store::CatalogStore;

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "Fixture")]
    fixture: String,
    #[tabled(rename = "Matchup")]
    matchup: String,
    #[tabled(rename = "League")]
    league: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Moneyline (H/A/D)")]
    moneyline: String,
    #[tabled(rename = "Spread")]
    spread: String,
    #[tabled(rename = "Total")]
    total: String,
}

fn board_row(odds: &BettingOdds) -> BoardRow {
    BoardRow {
        fixture: odds.fixture_id.to_string(),
        matchup: odds.matchup(),
        league: odds.league.clone(),
        starts: odds.start_time.format("%Y-%m-%d %H:%M").to_string(),
        moneyline: moneyline_cell(odds),
        spread: spread_cell(odds),
        total: total_cell(odds),
    }
}

fn moneyline_cell(odds: &BettingOdds) -> String {
    match &odds.moneyline {
        Some(ml) => match ml.draw {
            Some(draw) => format!("{} / {} / {}", ml.home, ml.away, draw),
            None => format!("{} / {}", ml.home, ml.away),
        },
        None => "-".to_string(),
    }
}

fn spread_cell(odds: &BettingOdds) -> String {
    match &odds.spread {
        Some(spread) => format!("{} ({} / {})", spread.line, spread.home, spread.away),
        None => "-".to_string(),
    }
}

fn total_cell(odds: &BettingOdds) -> String {
    match &odds.total {
        Some(total) => format!("{} (O {} / U {})", total.line, total.over, total.under),
        None => "-".to_string(),
    }
}

/// Execute the odds command: fetch the board, persist it, and print it.
pub async fn execute(args: &OddsArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(ref sport) = args.sport {
        config.feed.sport = sport.clone();
    }

    let store = open_store(&config)?;
    let catalog = if args.mock {
        OddsCatalog::mock_only()
    } else {
        OddsCatalog::from_config(&config.feed)
    };

    let fetched = catalog.fetch(&config.feed.sport).await?;
    store.replace_odds(&fetched.odds).await?;

    output::section("Odds board");
    output::key_value("Sport", &config.feed.sport);
    output::key_value("Source", fetched.source);
    println!();

    if fetched.odds.is_empty() {
        output::note("No fixtures quoted right now.");
        return Ok(());
    }

    let rows: Vec<BoardRow> = fetched.odds.iter().map(board_row).collect();
    output::table(&Table::new(rows).to_string());

    println!();
    println!(
        "  Stage a pick with {}",
        output::highlight("stakehouse slip add <fixture> --market <market> --side <side>")
    );
    println!();

    Ok(())
}
