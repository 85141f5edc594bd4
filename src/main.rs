use clap::Parser;

use stakehouse::cli::{self, output, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Odds(args) => cli::odds::execute(args).await,
        Commands::Slip(command) => cli::slip::execute(command).await,
        Commands::Place(args) => cli::bets::place(args).await,
        Commands::Wallet(args) => cli::wallet::show(args).await,
        Commands::Deposit(args) => cli::wallet::deposit(args).await,
        Commands::Withdraw(args) => cli::wallet::withdraw(args).await,
        Commands::Payments(command) => cli::payments::execute(command).await,
        Commands::History(args) => cli::bets::history(args).await,
        Commands::Cancel(args) => cli::bets::cancel(args).await,
        Commands::Settle(args) => cli::settle::execute(args).await,
        Commands::Check(command) => cli::check::execute(command).await,
    };

    if let Err(err) = result {
        output::error(&err.to_string());
        std::process::exit(if err.is_fatal() { 2 } else { 1 });
    }
}
