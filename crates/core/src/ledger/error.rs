//! Ledger error types for movement validation.

use bartally_shared::{DomainError, ErrorKind};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when validating a movement before it is
/// appended to the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Movement quantity cannot be zero.
    #[error("Movement quantity cannot be zero")]
    ZeroQuantity,

    /// Movement quantity cannot be negative; direction is encoded by
    /// the movement type, never by the sign of the input.
    #[error("Movement quantity cannot be negative, got {0}")]
    NegativeQuantity(Decimal),

    /// Movement unit cost cannot be negative.
    #[error("Movement unit cost cannot be negative, got {0}")]
    NegativeUnitCost(Decimal),

    /// ADJUSTMENT movements are posted only by stocktake approval.
    #[error("ADJUSTMENT movements are created by stocktake approval, not recorded directly")]
    AdjustmentReserved,

    /// Unknown movement type string.
    #[error("Unknown movement type: {0}")]
    UnknownMovementType(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroQuantity => "ZERO_QUANTITY",
            Self::NegativeQuantity(_) => "NEGATIVE_QUANTITY",
            Self::NegativeUnitCost(_) => "NEGATIVE_UNIT_COST",
            Self::AdjustmentReserved => "ADJUSTMENT_RESERVED",
            Self::UnknownMovementType(_) => "UNKNOWN_MOVEMENT_TYPE",
        }
    }
}

impl DomainError for LedgerError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    fn error_code(&self) -> &'static str {
        self.code()
    }
}
