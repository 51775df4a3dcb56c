//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised around ledger construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A stored balance disagrees with the rebuilt ledger.
    #[error("Stored balance {stored} does not match ledger balance {computed}")]
    BalanceDrift {
        /// Balance as stored.
        stored: Decimal,
        /// Final balance of the rebuilt ledger.
        computed: Decimal,
    },

    /// Entity type is not one of driver, supplier or party.
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BalanceDrift { .. } => "BALANCE_DRIFT",
            Self::UnknownEntityType(_) => "UNKNOWN_ENTITY_TYPE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnknownEntityType(_) => 400,
            Self::BalanceDrift { .. } => 409,
        }
    }
}
