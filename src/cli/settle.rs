//! Handler for the `settle` command.

use crate::cli::{open_sportsbook, output, SettleArgs};
use crate::config::Config;
use crate::domain::payout::format_usd;
use crate::domain::FixtureResult;
use crate::error::Result;

/// Execute the settle command.
pub async fn execute(args: &SettleArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let (_, book) = open_sportsbook(&config)?;

    let result = FixtureResult::new(args.fixture.clone(), args.home_score, args.away_score);
    let summary = book.settle_fixture(&result).await?;

    output::section("Settlement");
    output::key_value("Fixture", &args.fixture);
    output::key_value("Score", format!("{} - {}", args.home_score, args.away_score));
    println!();

    if summary.settled == 0 && summary.skipped == 0 {
        output::note("No pending bets on this fixture.");
        return Ok(());
    }

    output::key_value("Settled", summary.settled);
    output::key_value("Won", summary.won);
    output::key_value("Lost", summary.lost);
    output::key_value("Refunded", summary.refunded);
    output::key_value(
        "Paid out",
        output::highlight(format_usd(summary.total_paid_out)),
    );
    if summary.skipped > 0 {
        output::warn(&format!(
            "{} bets could not be graded and stay pending",
            summary.skipped
        ));
    }
    println!();

    Ok(())
}
