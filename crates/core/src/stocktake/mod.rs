//! Stocktake lifecycle, line derivation, and category rollups.
//!
//! A stocktake snapshots a hotel's beverage stock over a period. Lines
//! are populated from the ledger with a frozen basis, counts are
//! recorded against them, and approval reconciles the book via
//! adjustment movements. Everything here is pure domain logic; the
//! persistence layer wires it to storage.

pub mod error;
pub mod line;
pub mod period;
pub mod rollup;
pub mod types;

#[cfg(test)]
mod line_props;

pub use error::StocktakeError;
pub use line::{LineBasis, LineTotals, derive_line};
pub use period::StockPeriod;
pub use rollup::{CategoryRollup, CategoryTotal, LineValue, RollupTotals, UNCATEGORIZED, rollup};
pub use types::{NewStocktake, StocktakeStatus};
