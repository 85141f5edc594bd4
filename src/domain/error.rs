//! Ledger validation errors for core domain types.
//!
//! Every rejected wallet or slip operation maps to one of these classes.
//! `ConsistencyViolation` is different in kind: it means a conservation
//! invariant was broken by internal state, not by caller input, and callers
//! should treat it as fatal.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when a ledger operation is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller-supplied value failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Which input was rejected.
        field: &'static str,
        /// Human-readable rejection reason.
        reason: String,
    },

    /// Spendable balance cannot cover the requested amount.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// Bet placement was attempted with no selections on the slip.
    #[error("bet slip is empty")]
    EmptySlip,

    /// A referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Internal ledger state broke a conservation invariant.
    #[error("ledger consistency violation: {detail}")]
    ConsistencyViolation { detail: String },
}

impl LedgerError {
    /// Shorthand for an [`LedgerError::InvalidInput`] rejection.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors that indicate corrupted state rather than bad input.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConsistencyViolation { .. })
    }
}
