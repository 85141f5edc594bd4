//! Handlers for the `slip` subcommands.

use tabled::{Table, Tabled};

use crate::cli::{
    open_sportsbook, output, resolve_user, MarketArg, SessionArgs, SideArg, SlipAddArgs,
    SlipCommand, SlipRemoveArgs,
};
use crate::config::Config;
use crate::domain::{
    BettingOdds, EntryId, FixtureId, LedgerError, MoneylinePick, Selection, SlipAdd, SlipEntry,
    TeamSide, TotalSide,
};
use crate::error::Result;
use crate::store::CatalogStore;

/// Execute a slip subcommand.
pub async fn execute(command: &SlipCommand) -> Result<()> {
    match command {
        SlipCommand::Add(args) => add(args).await,
        SlipCommand::Remove(args) => remove(args).await,
        SlipCommand::Clear(args) => clear(args).await,
        SlipCommand::Show(args) => show(args).await,
    }
}

fn market_name(market: MarketArg) -> &'static str {
    match market {
        MarketArg::Moneyline => "moneyline",
        MarketArg::Spread => "spread",
        MarketArg::Total => "total",
    }
}

fn side_name(side: SideArg) -> &'static str {
    match side {
        SideArg::Home => "home",
        SideArg::Away => "away",
        SideArg::Draw => "draw",
        SideArg::Over => "over",
        SideArg::Under => "under",
    }
}

fn missing_market(board: &BettingOdds, market: MarketArg) -> LedgerError {
    LedgerError::invalid(
        "market",
        format!(
            "no {} market quoted for {}",
            market_name(market),
            board.matchup()
        ),
    )
}

/// Map `--market`/`--side` flags onto a typed selection against a fixture.
///
/// The spread line is taken from the board and signed for the chosen side,
/// so backing the away side of a -1.5 home spread yields `+1.5`.
pub fn selection_from_args(
    board: &BettingOdds,
    market: MarketArg,
    side: SideArg,
) -> Result<Selection> {
    let selection = match (market, side) {
        (MarketArg::Moneyline, SideArg::Home) => Selection::Moneyline {
            pick: MoneylinePick::Home,
            team: board.home_team.clone(),
        },
        (MarketArg::Moneyline, SideArg::Away) => Selection::Moneyline {
            pick: MoneylinePick::Away,
            team: board.away_team.clone(),
        },
        (MarketArg::Moneyline, SideArg::Draw) => Selection::Moneyline {
            pick: MoneylinePick::Draw,
            team: String::new(),
        },
        (MarketArg::Spread, SideArg::Home) => {
            let spread = board
                .spread
                .as_ref()
                .ok_or_else(|| missing_market(board, market))?;
            Selection::Spread {
                side: TeamSide::Home,
                team: board.home_team.clone(),
                line: spread.line,
            }
        }
        (MarketArg::Spread, SideArg::Away) => {
            let spread = board
                .spread
                .as_ref()
                .ok_or_else(|| missing_market(board, market))?;
            Selection::Spread {
                side: TeamSide::Away,
                team: board.away_team.clone(),
                line: -spread.line,
            }
        }
        (MarketArg::Total, SideArg::Over) => {
            let total = board
                .total
                .as_ref()
                .ok_or_else(|| missing_market(board, market))?;
            Selection::Total {
                side: TotalSide::Over,
                line: total.line,
            }
        }
        (MarketArg::Total, SideArg::Under) => {
            let total = board
                .total
                .as_ref()
                .ok_or_else(|| missing_market(board, market))?;
            Selection::Total {
                side: TotalSide::Under,
                line: total.line,
            }
        }
        _ => {
            return Err(LedgerError::invalid(
                "side",
                format!(
                    "'{}' does not apply to the {} market",
                    side_name(side),
                    market_name(market)
                ),
            )
            .into())
        }
    };
    Ok(selection)
}

async fn add(args: &SlipAddArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (store, book) = open_sportsbook(&config)?;

    let fixture = FixtureId::new(args.fixture.clone());
    let board = store
        .odds_for_fixture(&fixture)
        .await?
        .ok_or_else(|| LedgerError::NotFound {
            kind: "fixture",
            id: fixture.to_string(),
        })?;

    let selection = selection_from_args(&board, args.market, args.side)?;
    match book.add_selection(&user, &board, selection.clone()).await? {
        SlipAdd::Added { entry_id } => {
            output::ok(&format!(
                "Staged {} ({})",
                selection.label(),
                board.matchup()
            ));
            if let Some(price) = board.price_for(&selection) {
                output::key_value("Odds", price);
            }
            output::key_value("Entry", output::highlight(entry_id));
        }
        SlipAdd::AlreadyInSlip { entry_id } => {
            output::warn(&format!("{} is already on the slip", selection.label()));
            output::key_value("Entry", output::highlight(entry_id));
        }
    }
    Ok(())
}

async fn remove(args: &SlipRemoveArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let entry = EntryId::new(args.entry.clone());
    if book.remove_selection(&user, &entry).await? {
        output::ok("Selection removed");
    } else {
        output::warn(&format!("No slip entry with id {}", args.entry));
    }
    Ok(())
}

async fn clear(args: &SessionArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    book.clear_slip(&user).await?;
    output::ok("Slip cleared");
    Ok(())
}

#[derive(Tabled)]
struct SlipRow {
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Matchup")]
    matchup: String,
    #[tabled(rename = "League")]
    league: String,
    #[tabled(rename = "Pick")]
    pick: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Added")]
    added: String,
}

fn slip_row(entry: &SlipEntry) -> SlipRow {
    SlipRow {
        entry: entry.id().to_string(),
        matchup: entry.matchup(),
        league: entry.league().to_string(),
        pick: entry.selection().label(),
        odds: entry.odds().to_string(),
        added: entry.added_at().format("%Y-%m-%d %H:%M").to_string(),
    }
}

async fn show(args: &SessionArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let user = resolve_user(args.user.as_deref(), &config);
    let (_, book) = open_sportsbook(&config)?;

    let slip = book.slip(&user).await?;

    output::section("Bet slip");
    output::key_value("User", &user);
    output::key_value("Selections", slip.len());
    println!();

    if slip.is_empty() {
        output::note("Slip is empty.");
        println!(
            "  Stage a pick with {}",
            output::highlight("stakehouse slip add <fixture> --market <market> --side <side>")
        );
        println!();
        return Ok(());
    }

    let rows: Vec<SlipRow> = slip.entries().iter().map(slip_row).collect();
    output::table(&Table::new(rows).to_string());

    println!();
    println!(
        "  Place with {}",
        output::highlight("stakehouse place --stake <amount>")
    );
    println!();

    Ok(())
}
