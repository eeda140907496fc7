//! Purchase-unit to base-unit conversion.
//!
//! CRITICAL: all quantity math is fixed-point decimal:
//! - Counts convert exactly (multiplication only, no rounding)
//! - The single division in the system (`unit_cost / uom`) uses
//!   banker's rounding (round half to even) at a fixed scale
//! - Valuation products stay exact because stored scales never overflow

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::CatalogError;
use super::types::UomStrategy;

/// Scale of the frozen cost-per-base-unit valuation.
pub const VALUATION_COST_SCALE: u32 = 6;

/// Validates a UOM multiplier.
///
/// # Errors
///
/// Returns an error if the multiplier is zero or negative.
pub fn validate_uom(uom: Decimal) -> Result<(), CatalogError> {
    if uom <= Decimal::ZERO {
        return Err(CatalogError::NonPositiveUom(uom));
    }
    Ok(())
}

/// Validates a cost per purchase unit.
///
/// # Errors
///
/// Returns an error if the cost is negative.
pub fn validate_unit_cost(unit_cost: Decimal) -> Result<(), CatalogError> {
    if unit_cost < Decimal::ZERO {
        return Err(CatalogError::NegativeUnitCost(unit_cost));
    }
    Ok(())
}

/// Converts a physical count into a base-unit quantity.
///
/// `full_units` is the number of unopened purchase units. The meaning of
/// `partial_units` depends on the item's strategy:
/// - [`UomStrategy::FractionalRemainder`]: a fraction of one purchase
///   unit in `[0, 1)`, scaled by the UOM multiplier.
/// - [`UomStrategy::AbsoluteSubunitCount`]: an absolute count of loose
///   base units, added as-is.
///
/// # Errors
///
/// Returns an error on a non-positive UOM multiplier, a negative count,
/// or a fractional partial of one or more.
pub fn counted_qty(
    uom: Decimal,
    strategy: UomStrategy,
    full_units: i64,
    partial_units: Decimal,
) -> Result<Decimal, CatalogError> {
    validate_uom(uom)?;
    if full_units < 0 {
        return Err(CatalogError::NegativeFullUnits(full_units));
    }
    if partial_units < Decimal::ZERO {
        return Err(CatalogError::NegativePartialUnits(partial_units));
    }

    let partial_base = match strategy {
        UomStrategy::FractionalRemainder => {
            if partial_units >= Decimal::ONE {
                return Err(CatalogError::PartialNotFraction(partial_units));
            }
            partial_units * uom
        }
        UomStrategy::AbsoluteSubunitCount => partial_units,
    };

    Ok(Decimal::from(full_units) * uom + partial_base)
}

/// Derives the cost of one base unit from the purchase-unit cost.
///
/// Uses banker's rounding (round half to even) at
/// [`VALUATION_COST_SCALE`] to minimize cumulative valuation error.
///
/// # Errors
///
/// Returns an error if the UOM multiplier is not positive or the unit
/// cost is negative.
pub fn cost_per_base_unit(unit_cost: Decimal, uom: Decimal) -> Result<Decimal, CatalogError> {
    validate_uom(uom)?;
    validate_unit_cost(unit_cost)?;
    Ok((unit_cost / uom)
        .round_dp_with_strategy(VALUATION_COST_SCALE, RoundingStrategy::MidpointNearestEven))
}
