//! Property-based tests for line derivation and the category rollup.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::line::{LineBasis, derive_line};
use super::rollup::{LineValue, rollup};
use crate::catalog::UomStrategy;
use crate::ledger::MovementSums;
use bartally_shared::types::CategoryId;

/// Strategy to generate a quantity in base units (scale 4).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy to generate a frozen valuation cost (scale 6).
fn valuation_cost() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

/// Strategy to generate a UOM multiplier (scale 2, strictly positive).
fn uom() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy to generate a fractional partial in `[0, 1)` (scale 4).
fn fractional_partial() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy to generate an absolute loose-unit partial (scale 4).
fn absolute_partial() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy to generate period sums with directional magnitudes.
fn movement_sums() -> impl Strategy<Value = MovementSums> {
    (
        quantity(),
        quantity(),
        quantity(),
        quantity(),
        quantity(),
        (-5_000_000i64..5_000_000i64).prop_map(|n| Decimal::new(n, 4)),
    )
        .prop_map(
            |(purchases, sales, waste, transfers_in, transfers_out, adjustments)| MovementSums {
                purchases,
                sales,
                waste,
                transfers_in,
                transfers_out,
                adjustments,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* line, the variance value equals both
    /// `variance_qty x valuation_cost` and
    /// `counted_value - expected_value`, exactly.
    #[test]
    fn prop_value_identities_hold_exactly(
        uom in uom(),
        opening in quantity(),
        sums in movement_sums(),
        cost in valuation_cost(),
        full in 0i64..10_000i64,
        partial in absolute_partial(),
    ) {
        let basis = LineBasis {
            uom,
            uom_strategy: UomStrategy::AbsoluteSubunitCount,
            opening_qty: opening,
            sums,
            valuation_cost: cost,
        };
        let totals = derive_line(&basis, full, partial).unwrap();

        prop_assert_eq!(totals.variance_qty * cost, totals.variance_value);
        prop_assert_eq!(
            totals.counted_value - totals.expected_value,
            totals.variance_value
        );
    }

    /// *For any* absolute-strategy count, conversion is the literal
    /// `full x uom + partial`.
    #[test]
    fn prop_absolute_conversion_is_literal(
        uom in uom(),
        full in 0i64..10_000i64,
        partial in absolute_partial(),
    ) {
        let basis = LineBasis {
            uom,
            uom_strategy: UomStrategy::AbsoluteSubunitCount,
            opening_qty: Decimal::ZERO,
            sums: MovementSums::default(),
            valuation_cost: Decimal::ZERO,
        };
        let totals = derive_line(&basis, full, partial).unwrap();
        prop_assert_eq!(totals.counted_qty, Decimal::from(full) * uom + partial);
    }

    /// *For any* fractional-strategy count, conversion scales the
    /// fraction by the UOM multiplier.
    #[test]
    fn prop_fractional_conversion_scales(
        uom in uom(),
        full in 0i64..10_000i64,
        partial in fractional_partial(),
    ) {
        let basis = LineBasis {
            uom,
            uom_strategy: UomStrategy::FractionalRemainder,
            opening_qty: Decimal::ZERO,
            sums: MovementSums::default(),
            valuation_cost: Decimal::ZERO,
        };
        let totals = derive_line(&basis, full, partial).unwrap();
        prop_assert_eq!(
            totals.counted_qty,
            Decimal::from(full) * uom + partial * uom
        );
    }

    /// *For any* basis, zero counts always derive a counted quantity of
    /// zero and a variance of exactly `-expected_qty`.
    #[test]
    fn prop_zero_count_variance_is_negated_expected(
        uom in uom(),
        opening in quantity(),
        sums in movement_sums(),
        cost in valuation_cost(),
    ) {
        let basis = LineBasis {
            uom,
            uom_strategy: UomStrategy::FractionalRemainder,
            opening_qty: opening,
            sums,
            valuation_cost: cost,
        };
        let totals = derive_line(&basis, 0, Decimal::ZERO).unwrap();
        prop_assert_eq!(totals.counted_qty, Decimal::ZERO);
        prop_assert_eq!(totals.variance_qty, -totals.expected_qty);
        prop_assert_eq!(totals.variance_value, -totals.expected_value);
    }

    /// *For any* set of lines, the per-category totals sum to the grand
    /// total on every value column.
    #[test]
    fn prop_rollup_categories_sum_to_total(
        values in prop::collection::vec(
            (0usize..4usize, quantity(), quantity()),
            0..30,
        ),
    ) {
        // A small fixed pool of categories, index 3 meaning none.
        let pool: Vec<CategoryId> = (0..3).map(|_| CategoryId::new()).collect();
        let lines: Vec<LineValue> = values
            .into_iter()
            .map(|(slot, expected, counted)| {
                let category_id = pool.get(slot).copied();
                LineValue {
                    category_id,
                    category_name: category_id.map(|_| format!("Category {slot}")),
                    category_sort_order: category_id.map(|_| {
                        i32::try_from(slot).unwrap_or(i32::MAX)
                    }),
                    expected_value: expected,
                    counted_value: counted,
                    variance_value: counted - expected,
                }
            })
            .collect();

        let result = rollup(lines);
        let expected_sum: Decimal = result.categories.iter().map(|c| c.expected_value).sum();
        let counted_sum: Decimal = result.categories.iter().map(|c| c.counted_value).sum();
        let variance_sum: Decimal = result.categories.iter().map(|c| c.variance_value).sum();

        prop_assert_eq!(expected_sum, result.total.expected_value);
        prop_assert_eq!(counted_sum, result.total.counted_value);
        prop_assert_eq!(variance_sum, result.total.variance_value);
        prop_assert_eq!(
            result.total.variance_value,
            result.total.counted_value - result.total.expected_value
        );
    }
}
