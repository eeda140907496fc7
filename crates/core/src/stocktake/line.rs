//! Stocktake line derivation.
//!
//! Every derived field on a line is a pure function of the frozen
//! snapshot and the two staff-entered counts. Nothing here is ever
//! accepted as client input; the persisted line is recomputed from
//! scratch on every count update so it is always internally consistent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::error::CatalogError;
use crate::catalog::{UomStrategy, counted_qty};
use crate::ledger::MovementSums;

/// The frozen inputs a line's derived fields are computed from.
///
/// `opening_qty`, `sums`, and `valuation_cost` are snapshotted at
/// populate time and never change afterwards; `uom` and `uom_strategy`
/// are copied from the item so later catalog edits cannot skew an open
/// count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineBasis {
    /// Purchase-unit-to-base-unit multiplier.
    pub uom: Decimal,
    /// How the partial count converts for this item.
    pub uom_strategy: UomStrategy,
    /// Ledger balance strictly before the period start.
    pub opening_qty: Decimal,
    /// Per-type movement sums within the period.
    pub sums: MovementSums,
    /// Cost per base unit frozen at populate time.
    pub valuation_cost: Decimal,
}

/// All derived fields of a stocktake line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Physical count converted to base units.
    pub counted_qty: Decimal,
    /// Quantity the ledger expects on hand.
    pub expected_qty: Decimal,
    /// `counted_qty - expected_qty`.
    pub variance_qty: Decimal,
    /// `expected_qty x valuation_cost`.
    pub expected_value: Decimal,
    /// `counted_qty x valuation_cost`.
    pub counted_value: Decimal,
    /// `counted_value - expected_value`.
    pub variance_value: Decimal,
}

/// Computes every derived field of a line from its basis and counts.
///
/// # Errors
///
/// Returns an error if the counts are negative or the fractional
/// partial is not below one.
pub fn derive_line(
    basis: &LineBasis,
    counted_full_units: i64,
    counted_partial_units: Decimal,
) -> Result<LineTotals, CatalogError> {
    let counted = counted_qty(
        basis.uom,
        basis.uom_strategy,
        counted_full_units,
        counted_partial_units,
    )?;
    let expected = basis.sums.expected_qty(basis.opening_qty);
    let expected_value = expected * basis.valuation_cost;
    let counted_value = counted * basis.valuation_cost;

    Ok(LineTotals {
        counted_qty: counted,
        expected_qty: expected,
        variance_qty: counted - expected,
        expected_value,
        counted_value,
        variance_value: counted_value - expected_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn keg_basis() -> LineBasis {
        // Scenario: uom 12, opening 120, purchases 144, sales 96, waste 12
        LineBasis {
            uom: dec!(12),
            uom_strategy: UomStrategy::AbsoluteSubunitCount,
            opening_qty: dec!(120),
            sums: MovementSums {
                purchases: dec!(144),
                sales: dec!(96),
                waste: dec!(12),
                ..MovementSums::default()
            },
            valuation_cost: dec!(2.500000),
        }
    }

    #[test]
    fn test_variance_of_eight() {
        let totals = derive_line(&keg_basis(), 13, dec!(8)).unwrap();
        assert_eq!(totals.expected_qty, dec!(156));
        assert_eq!(totals.counted_qty, dec!(164));
        assert_eq!(totals.variance_qty, dec!(8));
        assert_eq!(totals.variance_value, dec!(8) * dec!(2.500000));
    }

    #[test]
    fn test_value_identity_holds_both_ways() {
        let totals = derive_line(&keg_basis(), 13, dec!(8)).unwrap();
        assert_eq!(
            totals.variance_value,
            totals.variance_qty * dec!(2.500000)
        );
        assert_eq!(
            totals.variance_value,
            totals.counted_value - totals.expected_value
        );
    }

    #[test]
    fn test_zero_counts_give_negative_expected_variance() {
        // A freshly populated line counts as zero on hand.
        let totals = derive_line(&keg_basis(), 0, Decimal::ZERO).unwrap();
        assert_eq!(totals.counted_qty, Decimal::ZERO);
        assert_eq!(totals.variance_qty, dec!(-156));
        assert_eq!(totals.counted_value, Decimal::ZERO);
        assert_eq!(totals.variance_value, -totals.expected_value);
    }

    #[test]
    fn test_fractional_remainder_scales_partial() {
        let basis = LineBasis {
            uom_strategy: UomStrategy::FractionalRemainder,
            ..keg_basis()
        };
        // 13 cases + a quarter case of 12 = 159 bottles
        let totals = derive_line(&basis, 13, dec!(0.25)).unwrap();
        assert_eq!(totals.counted_qty, dec!(159));
        assert_eq!(totals.variance_qty, dec!(3));
    }

    #[test]
    fn test_negative_counts_propagate_as_errors() {
        assert!(derive_line(&keg_basis(), -1, Decimal::ZERO).is_err());
        assert!(derive_line(&keg_basis(), 0, dec!(-8)).is_err());
    }

    #[test]
    fn test_shrinkage_shows_negative_variance() {
        // Expected 156, counted 12 full cases = 144
        let totals = derive_line(&keg_basis(), 12, Decimal::ZERO).unwrap();
        assert_eq!(totals.variance_qty, dec!(-12));
        assert!(totals.variance_value < Decimal::ZERO);
    }
}
