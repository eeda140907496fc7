//! `SeaORM` entity definitions for the inventory schema.
//!
//! Status, movement type, base unit, and UOM strategy columns are
//! stored as their stable string forms from `bartally-core`, so the
//! schema runs unchanged on PostgreSQL and SQLite.

pub mod stock_categories;
pub mod stock_items;
pub mod stock_movements;
pub mod stocktake_lines;
pub mod stocktakes;
