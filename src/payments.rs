//! Deposit notices from external payment processors.
//!
//! Processors retry webhook deliveries, so every notice carries a transaction
//! id and application is idempotent (see `Sportsbook::apply_deposit`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{TransactionId, UserId};

/// One credit event. Accepts both snake_case and the camelCase field names
/// that hosted processors emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositNotice {
    #[serde(alias = "userId")]
    pub user_id: UserId,
    pub amount: Decimal,
    #[serde(alias = "transactionId")]
    pub transaction_id: TransactionId,
}
