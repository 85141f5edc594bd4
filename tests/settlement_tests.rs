//! Settlement behavior over a real store: the grading matrix, push refunds,
//! prop bets that a score cannot grade, and fixture/user isolation.

mod harness;
mod support;

use chrono::Utc;
use rust_decimal_macros::dec;

use stakehouse::domain::payout::payout;
use stakehouse::domain::{Bet, BetStatus, FixtureResult, Selection, SlipEntry, UserId};
use stakehouse::store::{BetStore, CatalogStore};

use harness::temp_db::TempDb;

#[tokio::test]
async fn pushes_refund_the_stake_without_touching_the_tallies() {
    let db = TempDb::create("settle-push");
    let store = db.store();
    let book = db.sportsbook_unfunded();
    let user = UserId::new("alice");

    let board = support::board::soccer_board("fix-push", "Arsenal", "Chelsea");
    store.replace_odds(&[board.clone()]).await.unwrap();

    book.deposit(&user, dec!(100)).await.unwrap();
    book.add_selection(&user, &board, support::board::over(&board))
        .await
        .unwrap();
    book.add_selection(&user, &board, support::board::under(&board))
        .await
        .unwrap();
    book.place_bet(&user, dec!(40)).await.unwrap();

    // 2-1 lands exactly on the 3.0 total: both sides push.
    let summary = book
        .settle_fixture(&FixtureResult::new("fix-push", 2, 1))
        .await
        .unwrap();
    assert_eq!(summary.settled, 2);
    assert_eq!(summary.refunded, 2);
    assert_eq!(summary.won, 0);
    assert_eq!(summary.lost, 0);
    assert_eq!(summary.total_paid_out, dec!(0));

    let wallet = book.wallet(&user).await.unwrap();
    assert_eq!(wallet.balance(), dec!(100));
    assert_eq!(wallet.pending_bets(), dec!(0));
    assert_eq!(wallet.total_won(), dec!(0));
    assert_eq!(wallet.total_lost(), dec!(0));

    let bets = book.history(&user, None).await.unwrap();
    assert!(bets
        .iter()
        .all(|bet| bet.status() == BetStatus::Cancelled));
}

#[tokio::test]
async fn draw_pick_cashes_on_a_level_score() {
    let db = TempDb::create("settle-draw");
    let store = db.store();
    let book = db.sportsbook_unfunded();
    let user = UserId::new("alice");

    let board = support::board::soccer_board("fix-draw", "Arsenal", "Chelsea");
    store.replace_odds(&[board.clone()]).await.unwrap();

    book.deposit(&user, dec!(100)).await.unwrap();
    book.add_selection(&user, &board, support::board::draw_ml())
        .await
        .unwrap();
    book.place_bet(&user, dec!(25)).await.unwrap();

    let summary = book
        .settle_fixture(&FixtureResult::new("fix-draw", 2, 2))
        .await
        .unwrap();
    assert_eq!(summary.won, 1);

    // $25 at +280 returns $95.
    let wallet = book.wallet(&user).await.unwrap();
    assert_eq!(wallet.balance(), dec!(170));
    assert_eq!(wallet.total_won(), dec!(95));
}

#[tokio::test]
async fn spread_sides_grade_against_their_own_lines() {
    let db = TempDb::create("settle-spread");
    let store = db.store();
    let book = db.sportsbook_unfunded();
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    let board = support::board::soccer_board("fix-spread", "Arsenal", "Chelsea");
    store.replace_odds(&[board.clone()]).await.unwrap();

    book.deposit(&alice, dec!(100)).await.unwrap();
    book.add_selection(&alice, &board, support::board::home_spread(&board))
        .await
        .unwrap();
    book.place_bet(&alice, dec!(20)).await.unwrap();

    book.deposit(&bob, dec!(100)).await.unwrap();
    book.add_selection(&bob, &board, support::board::away_spread(&board))
        .await
        .unwrap();
    book.place_bet(&bob, dec!(20)).await.unwrap();

    // Home by two: -1.5 covers, +1.5 does not.
    let summary = book
        .settle_fixture(&FixtureResult::new("fix-spread", 3, 1))
        .await
        .unwrap();
    assert_eq!(summary.settled, 2);
    assert_eq!(summary.won, 1);
    assert_eq!(summary.lost, 1);

    let winnings = payout(dec!(20), support::board::odds(-110));
    assert_eq!(summary.total_paid_out, winnings);

    let alices = book.wallet(&alice).await.unwrap();
    assert_eq!(alices.balance(), dec!(80) + winnings);
    assert_eq!(alices.total_won(), winnings);
    assert_eq!(alices.total_lost(), dec!(0));

    let bobs = book.wallet(&bob).await.unwrap();
    assert_eq!(bobs.balance(), dec!(80));
    assert_eq!(bobs.total_lost(), dec!(20));
}

#[tokio::test]
async fn ungradable_selections_stay_pending() {
    let db = TempDb::create("settle-props");
    let store = db.store();
    let book = db.sportsbook_unfunded();
    let user = UserId::new("alice");

    let board = support::board::soccer_board("fix-prop", "Arsenal", "Chelsea");
    store.replace_odds(&[board.clone()]).await.unwrap();

    // A prop market ticket cannot be staged from the board; append one
    // directly, the way an imported history row would arrive.
    let entry = SlipEntry::new(
        &board,
        Selection::Props {
            label: "First scorer".into(),
        },
        support::board::odds(-115),
        Utc::now(),
    );
    let bet = Bet::place(user.clone(), &entry, dec!(10), Utc::now());
    store.append_bets(&user, &[bet]).await.unwrap();

    let summary = book
        .settle_fixture(&FixtureResult::new("fix-prop", 2, 1))
        .await
        .unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.settled, 0);
    assert_eq!(summary.total_paid_out, dec!(0));

    let bets = book.history(&user, None).await.unwrap();
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].status(), BetStatus::Pending);
}

#[tokio::test]
async fn settlement_only_touches_the_named_fixture() {
    let db = TempDb::create("settle-isolation");
    let store = db.store();
    let book = db.sportsbook_unfunded();
    let user = UserId::new("alice");

    let first = support::board::soccer_board("fix-a", "Arsenal", "Chelsea");
    let second = support::board::soccer_board("fix-b", "Leeds", "Everton");
    store
        .replace_odds(&[first.clone(), second.clone()])
        .await
        .unwrap();

    book.deposit(&user, dec!(100)).await.unwrap();
    book.add_selection(&user, &first, support::board::away_ml(&first))
        .await
        .unwrap();
    book.place_bet(&user, dec!(10)).await.unwrap();
    book.add_selection(&user, &second, support::board::away_ml(&second))
        .await
        .unwrap();
    book.place_bet(&user, dec!(10)).await.unwrap();

    let summary = book
        .settle_fixture(&FixtureResult::new("fix-a", 0, 1))
        .await
        .unwrap();
    assert_eq!(summary.settled, 1);
    assert_eq!(summary.won, 1);

    // The fix-b stake is still reserved and its ticket still open.
    let wallet = book.wallet(&user).await.unwrap();
    assert_eq!(wallet.pending_bets(), dec!(10));
    assert_eq!(wallet.balance(), dec!(105));

    let pending = book.history(&user, Some(BetStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].fixture_id().as_str(), "fix-b");
}
