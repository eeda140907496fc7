//! Movement ledger logic.
//!
//! This module implements the append-only movement log's domain rules:
//! - Movement types and their signed direction
//! - Input validation for recording movements
//! - Per-type period sums and the expected-quantity formula
//! - Error types for ledger operations

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod movement_props;

pub use error::LedgerError;
pub use types::{MovementSums, MovementType, NewMovement};
pub use validation::{validate_adjustment_delta, validate_new_movement};
