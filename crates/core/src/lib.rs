//! Core business logic for BarTally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `catalog` - Beverage items, categories, and UOM conversion
//! - `ledger` - Append-only stock movement bookkeeping
//! - `stocktake` - Stocktake lifecycle, line derivation, and rollups
//! - `events` - Domain events emitted by the write paths

pub mod catalog;
pub mod events;
pub mod ledger;
pub mod stocktake;
