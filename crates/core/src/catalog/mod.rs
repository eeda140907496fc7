//! Catalog and unit-of-measure model.
//!
//! Defines, per stock item, how a physical count (full purchase units
//! plus a partial remainder) converts into a base-unit quantity, and
//! what one base unit costs:
//! - Base units and per-item UOM strategies
//! - Count-to-quantity conversion
//! - Valuation cost derivation with banker's rounding
//! - Item configuration validation

pub mod conversion;
pub mod error;
pub mod types;

pub use conversion::{
    VALUATION_COST_SCALE, cost_per_base_unit, counted_qty, validate_uom, validate_unit_cost,
};
pub use error::CatalogError;
pub use types::{BaseUnit, NewCategory, NewItem, UomStrategy, validate_new_category, validate_new_item};
