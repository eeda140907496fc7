//! Ledger domain types for recording stock movements.
//!
//! The ledger stores each movement's SIGNED contribution in base units,
//! so an item's running quantity is literally the sum of its movement
//! quantities. Callers supply positive magnitudes; the movement type
//! supplies the direction.

use bartally_shared::types::{HotelId, ItemId, StaffId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// The kind of quantity-changing event recorded against an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Stock received from a supplier.
    Purchase,
    /// Stock sold to a guest.
    Sale,
    /// Stock written off (breakage, spoilage, spillage).
    Waste,
    /// Stock received from another outlet or hotel.
    TransferIn,
    /// Stock sent to another outlet or hotel.
    TransferOut,
    /// Reconciliation delta posted by stocktake approval.
    Adjustment,
}

impl MovementType {
    /// All movement types, in reporting order.
    pub const ALL: [Self; 6] = [
        Self::Purchase,
        Self::Sale,
        Self::Waste,
        Self::TransferIn,
        Self::TransferOut,
        Self::Adjustment,
    ];

    /// Returns the stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "PURCHASE",
            Self::Sale => "SALE",
            Self::Waste => "WASTE",
            Self::TransferIn => "TRANSFER_IN",
            Self::TransferOut => "TRANSFER_OUT",
            Self::Adjustment => "ADJUSTMENT",
        }
    }

    /// Returns true for types that remove stock.
    #[must_use]
    pub const fn is_outbound(self) -> bool {
        matches!(self, Self::Sale | Self::Waste | Self::TransferOut)
    }

    /// Returns true for the reconciliation type reserved for approval.
    #[must_use]
    pub const fn is_adjustment(self) -> bool {
        matches!(self, Self::Adjustment)
    }

    /// Applies this type's direction to a magnitude.
    ///
    /// Outbound types negate; inbound types pass through. An
    /// adjustment quantity already carries its own sign and passes
    /// through unchanged.
    #[must_use]
    pub fn signed(self, magnitude: Decimal) -> Decimal {
        if self.is_outbound() { -magnitude } else { magnitude }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASE" => Ok(Self::Purchase),
            "SALE" => Ok(Self::Sale),
            "WASTE" => Ok(Self::Waste),
            "TRANSFER_IN" => Ok(Self::TransferIn),
            "TRANSFER_OUT" => Ok(Self::TransferOut),
            "ADJUSTMENT" => Ok(Self::Adjustment),
            other => Err(LedgerError::UnknownMovementType(other.to_string())),
        }
    }
}

/// Input for recording a movement against an item.
///
/// `quantity` is a positive magnitude in base units; direction comes
/// from `movement_type`.
#[derive(Debug, Clone)]
pub struct NewMovement {
    /// The hotel the item belongs to.
    pub hotel_id: HotelId,
    /// The item the movement is recorded against.
    pub item_id: ItemId,
    /// What happened to the stock.
    pub movement_type: MovementType,
    /// Positive magnitude in base units.
    pub quantity: Decimal,
    /// Cost per base unit at the time of the movement, if known.
    pub unit_cost: Option<Decimal>,
    /// External reference; doubles as an idempotency key for retries.
    pub reference: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the movement physically happened. Defaults to now, so
    /// back-dated paper entries land in the right stocktake period.
    pub occurred_at: Option<DateTime<Utc>>,
    /// The staff member recording the movement.
    pub recorded_by: StaffId,
}

/// Per-type movement sums over a stocktake period.
///
/// The five directional sums are positive magnitudes; `adjustments` is
/// a net signed sum, since approval posts deltas in either direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementSums {
    /// Total purchased, in base units.
    pub purchases: Decimal,
    /// Total sold, in base units.
    pub sales: Decimal,
    /// Total wasted, in base units.
    pub waste: Decimal,
    /// Total transferred in, in base units.
    pub transfers_in: Decimal,
    /// Total transferred out, in base units.
    pub transfers_out: Decimal,
    /// Net signed adjustment total, in base units.
    pub adjustments: Decimal,
}

impl MovementSums {
    /// The quantity the ledger expects on hand after this period.
    ///
    /// `expected = opening + purchases + transfers_in - sales - waste
    /// - transfers_out + adjustments`
    #[must_use]
    pub fn expected_qty(&self, opening_qty: Decimal) -> Decimal {
        opening_qty + self.purchases + self.transfers_in
            - self.sales
            - self.waste
            - self.transfers_out
            + self.adjustments
    }

    /// Accumulates one signed movement contribution into the matching
    /// bucket (magnitude for directional types, signed for adjustments).
    pub fn accumulate(&mut self, movement_type: MovementType, signed_quantity: Decimal) {
        match movement_type {
            MovementType::Purchase => self.purchases += signed_quantity,
            MovementType::Sale => self.sales += -signed_quantity,
            MovementType::Waste => self.waste += -signed_quantity,
            MovementType::TransferIn => self.transfers_in += signed_quantity,
            MovementType::TransferOut => self.transfers_out += -signed_quantity,
            MovementType::Adjustment => self.adjustments += signed_quantity,
        }
    }
}
