//! Property-based tests for movement sign math and validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::{MovementSums, MovementType, NewMovement};
use super::validation::validate_new_movement;
use bartally_shared::types::{HotelId, ItemId, StaffId};

/// Strategy to generate a positive magnitude (0.0001 to 100,000.0000).
fn magnitude() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy to generate one of the five caller-recordable types.
fn directional_type() -> impl Strategy<Value = MovementType> {
    prop_oneof![
        Just(MovementType::Purchase),
        Just(MovementType::Sale),
        Just(MovementType::Waste),
        Just(MovementType::TransferIn),
        Just(MovementType::TransferOut),
    ]
}

/// Helper to build a movement input for testing.
fn make_input(movement_type: MovementType, quantity: Decimal) -> NewMovement {
    NewMovement {
        hotel_id: HotelId::new(),
        item_id: ItemId::new(),
        movement_type,
        quantity,
        unit_cost: None,
        reference: None,
        notes: None,
        occurred_at: None,
        recorded_by: StaffId::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* positive magnitude, applying a type's direction
    /// preserves the absolute value and sets the sign from the type.
    #[test]
    fn prop_signed_preserves_magnitude(
        movement_type in directional_type(),
        quantity in magnitude(),
    ) {
        let signed = movement_type.signed(quantity);
        prop_assert_eq!(signed.abs(), quantity);
        prop_assert_eq!(signed.is_sign_negative(), movement_type.is_outbound());
    }

    /// *For any* sequence of movements, bucketing them into per-type
    /// sums and evaluating the expected-quantity formula gives exactly
    /// the plain sum of signed contributions. The two bookkeeping views
    /// (signed ledger, directional-magnitude line sums) always agree.
    #[test]
    fn prop_bucketed_sums_match_signed_total(
        movements in prop::collection::vec((directional_type(), magnitude()), 0..40),
        opening in magnitude(),
    ) {
        let mut sums = MovementSums::default();
        let mut signed_total = Decimal::ZERO;

        for (movement_type, quantity) in &movements {
            let contribution = movement_type.signed(*quantity);
            sums.accumulate(*movement_type, contribution);
            signed_total += contribution;
        }

        prop_assert_eq!(
            sums.expected_qty(opening),
            opening + signed_total,
            "bucketed formula diverged from the signed ledger sum"
        );
    }

    /// *For any* signed adjustment deltas mixed into the sequence, the
    /// agreement between the two views still holds.
    #[test]
    fn prop_adjustments_keep_views_in_agreement(
        movements in prop::collection::vec((directional_type(), magnitude()), 0..20),
        deltas in prop::collection::vec((any::<bool>(), magnitude()), 0..10),
    ) {
        let mut sums = MovementSums::default();
        let mut signed_total = Decimal::ZERO;

        for (movement_type, quantity) in &movements {
            let contribution = movement_type.signed(*quantity);
            sums.accumulate(*movement_type, contribution);
            signed_total += contribution;
        }
        for (negative, magnitude) in &deltas {
            let delta = if *negative { -*magnitude } else { *magnitude };
            sums.accumulate(MovementType::Adjustment, delta);
            signed_total += delta;
        }

        prop_assert_eq!(sums.expected_qty(Decimal::ZERO), signed_total);
    }

    /// *For any* directional type, a positive quantity validates.
    #[test]
    fn prop_positive_quantity_accepted(
        movement_type in directional_type(),
        quantity in magnitude(),
    ) {
        let input = make_input(movement_type, quantity);
        prop_assert!(validate_new_movement(&input).is_ok());
    }

    /// *For any* directional type, a zero or negative quantity is
    /// rejected; sign never sneaks in through the input.
    #[test]
    fn prop_non_positive_quantity_rejected(
        movement_type in directional_type(),
        quantity in magnitude(),
    ) {
        let zero = make_input(movement_type, Decimal::ZERO);
        prop_assert!(validate_new_movement(&zero).is_err());

        let negative = make_input(movement_type, -quantity);
        prop_assert!(validate_new_movement(&negative).is_err());
    }
}
