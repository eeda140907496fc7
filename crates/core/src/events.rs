//! Domain events emitted by the write paths.
//!
//! Emission is fire-and-forget over a bounded channel so that a slow
//! or absent consumer never stalls a ledger write. A full or closed
//! channel drops the event and logs a warning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::ledger::MovementType;
use bartally_shared::types::{HotelId, ItemId, LineId, MovementId, StocktakeId};

/// Bounded channel capacity used by [`channel`].
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Every durable state change emits one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A stock movement was appended to the ledger.
    #[serde(rename = "movement.recorded")]
    MovementRecorded {
        hotel_id: HotelId,
        movement_id: MovementId,
        item_id: ItemId,
        movement_type: MovementType,
        /// Signed quantity in base units.
        quantity: Decimal,
    },
    /// A draft stocktake had its lines frozen from the ledger.
    #[serde(rename = "stocktake.populated")]
    StocktakePopulated {
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
        line_count: u64,
    },
    /// A physical count was recorded against a stocktake line.
    #[serde(rename = "stocktake.line.counted")]
    StocktakeLineCounted {
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
        line_id: LineId,
        item_id: ItemId,
        variance_qty: Decimal,
    },
    /// A stocktake was approved and its variances posted back.
    #[serde(rename = "stocktake.approved")]
    StocktakeApproved {
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
        adjustments_posted: u64,
    },
}

impl Event {
    /// The stable dotted name consumers subscribe on.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MovementRecorded { .. } => "movement.recorded",
            Self::StocktakePopulated { .. } => "stocktake.populated",
            Self::StocktakeLineCounted { .. } => "stocktake.line.counted",
            Self::StocktakeApproved { .. } => "stocktake.approved",
        }
    }

    /// The hotel the event belongs to.
    #[must_use]
    pub fn hotel_id(&self) -> HotelId {
        match self {
            Self::MovementRecorded { hotel_id, .. }
            | Self::StocktakePopulated { hotel_id, .. }
            | Self::StocktakeLineCounted { hotel_id, .. }
            | Self::StocktakeApproved { hotel_id, .. } => *hotel_id,
        }
    }
}

/// Cloneable handle the write paths use to emit events.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Event>,
}

impl EventSender {
    /// Wraps an existing channel half.
    #[must_use]
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    /// Emits an event without waiting. Never blocks the caller.
    pub fn emit(&self, event: Event) {
        let event_type = event.event_type();
        if let Err(err) = self.tx.try_send(event) {
            let reason = match err {
                mpsc::error::TrySendError::Full(_) => "full",
                mpsc::error::TrySendError::Closed(_) => "closed",
            };
            warn!(event_type, reason, "dropped domain event");
        }
    }
}

/// Creates a bounded event channel with the default capacity.
#[must_use]
pub fn channel() -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(DEFAULT_EVENT_CAPACITY);
    (EventSender::new(tx), rx)
}
