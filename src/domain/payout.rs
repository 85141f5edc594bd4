//! Payout math for American prices.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::odds::AmericanOdds;

/// Total return (stake plus profit) for a winning bet at an American price.
///
/// Positive price: profit is `stake * price / 100`. Negative price: profit is
/// `stake * 100 / |price|`. The result is exact `Decimal` arithmetic; rounding
/// to cents happens only at display time.
#[must_use]
pub fn payout(stake: Decimal, odds: AmericanOdds) -> Decimal {
    let price = odds.value();
    if price > 0 {
        stake + stake * Decimal::from(price) / dec!(100)
    } else {
        stake + stake * dec!(100) / Decimal::from(price.abs())
    }
}

/// Profit component only (payout minus stake).
#[must_use]
pub fn profit(stake: Decimal, odds: AmericanOdds) -> Decimal {
    payout(stake, odds) - stake
}

/// Render an amount as dollars with cents, e.g. `$25.00`.
///
/// Rounds to two places for display only; stored values stay unrounded.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
