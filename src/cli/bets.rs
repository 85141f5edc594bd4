//! Handlers for the `place`, `history`, and `cancel` commands.

use tabled::{Table, Tabled};

use crate::cli::{open_sportsbook, output, resolve_user, CancelArgs, HistoryArgs, PlaceArgs};
use crate::config::Config;
use crate::domain::payout::format_usd;
use crate::domain::Bet;
use crate::error::Result;

#[derive(Tabled)]
struct BetRow {
    #[tabled(rename = "Bet")]
    bet: String,
    #[tabled(rename = "Fixture")]
    fixture: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Pick")]
    pick: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Payout")]
    payout: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

fn bet_row(bet: &Bet) -> BetRow {
    BetRow {
        bet: bet.id().to_string(),
        fixture: bet.fixture_id().to_string(),
        market: bet.bet_type().to_string(),
        pick: bet.selection().label(),
        odds: bet.odds().to_string(),
        stake: format_usd(bet.stake()),
        payout: format_usd(bet.potential_payout()),
        status: bet.status().to_string(),
        placed: bet.placed_at().format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Execute the place command.
pub async fn place(args: &PlaceArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let receipt = book.place_bet(&user, args.stake).await?;
    output::ok(&receipt.message);
    println!();

    let rows: Vec<BetRow> = receipt.bets.iter().map(bet_row).collect();
    output::table(&Table::new(rows).to_string());
    println!();

    Ok(())
}

/// Execute the history command.
pub async fn history(args: &HistoryArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let bets = book.history(&user, args.status).await?;

    output::section("Bet history");
    output::key_value("User", &user);
    if let Some(status) = args.status {
        output::key_value("Filter", status);
    }
    output::key_value("Bets", bets.len());
    println!();

    if bets.is_empty() {
        output::note("No bets to show.");
        return Ok(());
    }

    let rows: Vec<BetRow> = bets.iter().map(bet_row).collect();
    output::table(&Table::new(rows).to_string());
    println!();

    Ok(())
}

/// Execute the cancel command.
pub async fn cancel(args: &CancelArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let bet = book.cancel_bet(&user, args.bet).await?;
    output::ok(&format!(
        "Cancelled {} and refunded {}",
        bet.id(),
        format_usd(bet.stake())
    ));

    Ok(())
}
