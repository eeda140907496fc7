//! Business rule validation for ledger operations.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::NewMovement;

/// Validates a movement before it is appended to the ledger.
///
/// # Errors
///
/// Returns an error if the quantity is not strictly positive, the unit
/// cost is negative, or the type is ADJUSTMENT (reserved for stocktake
/// approval).
pub fn validate_new_movement(input: &NewMovement) -> Result<(), LedgerError> {
    if input.movement_type.is_adjustment() {
        return Err(LedgerError::AdjustmentReserved);
    }
    if input.quantity == Decimal::ZERO {
        return Err(LedgerError::ZeroQuantity);
    }
    if input.quantity < Decimal::ZERO {
        return Err(LedgerError::NegativeQuantity(input.quantity));
    }
    if let Some(unit_cost) = input.unit_cost {
        if unit_cost < Decimal::ZERO {
            return Err(LedgerError::NegativeUnitCost(unit_cost));
        }
    }
    Ok(())
}

/// Validates a signed reconciliation delta before approval posts it.
///
/// # Errors
///
/// Returns an error if the delta is zero; zero-variance lines must be
/// skipped, not posted.
pub fn validate_adjustment_delta(delta: Decimal) -> Result<(), LedgerError> {
    if delta == Decimal::ZERO {
        return Err(LedgerError::ZeroQuantity);
    }
    Ok(())
}
