//! Handlers for the `wallet`, `deposit`, and `withdraw` commands.

use crate::cli::{open_sportsbook, output, resolve_user, AmountArgs, SessionArgs};
use crate::config::Config;
use crate::domain::payout::format_usd;
use crate::domain::Wallet;
use crate::error::Result;

fn print_wallet(wallet: &Wallet) {
    output::key_value("Currency", wallet.currency());
    output::key_value("Balance", output::highlight(format_usd(wallet.balance())));
    output::key_value("Pending bets", format_usd(wallet.pending_bets()));
    output::key_value("Total won", format_usd(wallet.total_won()));
    output::key_value("Total lost", format_usd(wallet.total_lost()));
}

/// Execute the wallet command.
pub async fn show(args: &SessionArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let wallet = book.wallet(&user).await?;

    output::section("Wallet");
    output::key_value("User", &user);
    print_wallet(&wallet);
    println!();

    Ok(())
}

/// Execute the deposit command.
pub async fn deposit(args: &AmountArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let wallet = book.deposit(&user, args.amount).await?;
    output::ok(&format!("Deposited {}", format_usd(args.amount)));
    output::key_value("Balance", output::highlight(format_usd(wallet.balance())));

    Ok(())
}

/// Execute the withdraw command.
pub async fn withdraw(args: &AmountArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let wallet = book.withdraw(&user, args.amount).await?;
    output::ok(&format!("Withdrew {}", format_usd(args.amount)));
    output::key_value("Balance", output::highlight(format_usd(wallet.balance())));

    Ok(())
}
