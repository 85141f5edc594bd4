//! Handlers for the `payments` subcommands.

use crate::cli::{open_sportsbook, output, PaymentsCommand, PaymentsConsumeArgs};
use crate::config::Config;
use crate::domain::payout::format_usd;
use crate::error::Result;
use crate::payments::DepositNotice;

/// Execute a payments subcommand.
pub async fn execute(command: &PaymentsCommand) -> Result<()> {
    match command {
        PaymentsCommand::Consume(args) => consume(args).await,
    }
}

/// Apply every deposit notice in the file, one at a time.
///
/// A bad notice never aborts the batch: duplicates and rejected amounts are
/// reported and counted as skipped while the rest proceed.
async fn consume(args: &PaymentsConsumeArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let (_, book) = open_sportsbook(&config)?;

    let content = std::fs::read_to_string(&args.file)?;
    let notices: Vec<DepositNotice> = serde_json::from_str(&content)?;

    output::section("Deposit notices");
    output::key_value("File", args.file.display());
    output::key_value("Notices", notices.len());
    println!();

    let mut applied = 0usize;
    let mut skipped = 0usize;
    for notice in &notices {
        match book.apply_deposit(notice).await {
            Ok(outcome) if outcome.is_applied() => {
                applied += 1;
                output::ok(&format!(
                    "{}: credited {} to {}",
                    notice.transaction_id,
                    format_usd(notice.amount),
                    notice.user_id
                ));
            }
            Ok(_) => {
                skipped += 1;
                output::warn(&format!(
                    "{}: already applied, skipped",
                    notice.transaction_id
                ));
            }
            Err(err) => {
                skipped += 1;
                output::warn(&format!("{}: rejected ({err})", notice.transaction_id));
            }
        }
    }

    println!();
    output::note(&format!("{applied} applied, {skipped} skipped"));

    Ok(())
}
