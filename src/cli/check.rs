//! Handlers for the `check` subcommands.

use crate::cli::{output, CheckCommand, ConfigPathArg};
use crate::config::Config;
use crate::domain::payout::format_usd;
use crate::error::Result;
use crate::feed::{OddsFeed, TheOddsApiClient};

/// Execute a check subcommand.
pub async fn execute(command: &CheckCommand) -> Result<()> {
    match command {
        CheckCommand::Config(args) => config(args),
        CheckCommand::Feed(args) => feed(args).await,
    }
}

/// Validate the configuration file without touching the network.
fn config(args: &ConfigPathArg) -> Result<()> {
    println!("Checking configuration: {}", args.config.display());
    println!();

    let config = Config::load(&args.config)?;

    output::ok("Configuration file is valid");
    println!();
    println!("Summary:");
    println!("  Database: {}", config.store.database_url);
    println!("  Sport: {}", config.feed.sport);
    println!("  Poll interval: {}s", config.feed.poll_interval_secs);
    println!("  Currency: {}", config.wallet.currency);
    println!(
        "  Starting balance: {}",
        format_usd(config.wallet.starting_balance)
    );
    println!("  Default user: {}", config.session.default_user);
    println!();

    if config.feed.api_key.is_some() {
        output::ok("Odds API key found (from ODDS_API_KEY env var)");
    } else {
        output::warn("No odds API key configured");
        println!("  Set ODDS_API_KEY to fetch live odds; the mock board still works");
    }

    println!();
    println!("Configuration is ready to use.");

    Ok(())
}

/// Call the live feed once and report what came back.
///
/// Talks to the client directly rather than through the catalog, so a broken
/// key or unreachable host surfaces here instead of silently falling back to
/// the mock board.
async fn feed(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(&args.config)?;

    println!("Testing odds feed for {}...", config.feed.sport);
    println!("  API: {}", config.feed.api_base_url);
    println!("  Regions: {}", config.feed.regions);
    println!("  Markets: {}", config.feed.markets);
    println!();

    output::progress("Fetching odds");
    let client = TheOddsApiClient::from_config(&config.feed);
    match client.fetch(&config.feed.sport).await {
        Ok(odds) => {
            output::progress_done(true);
            println!();
            output::ok(&format!("{} fixtures quoted", odds.len()));
        }
        Err(err) => {
            output::progress_done(false);
            return Err(err);
        }
    }

    Ok(())
}
