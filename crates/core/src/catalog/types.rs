//! Catalog domain types: units of measure and item configuration.

use bartally_shared::types::{CategoryId, HotelId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Base unit in which ledger quantities are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    /// Millilitres (wine, spirits, draught).
    Ml,
    /// Grams (coffee, garnish stock).
    G,
    /// Discrete pieces (bottled beer, cans).
    Piece,
}

impl BaseUnit {
    /// Returns the stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ml => "ml",
            Self::G => "g",
            Self::Piece => "piece",
        }
    }
}

impl std::fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BaseUnit {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ml" => Ok(Self::Ml),
            "g" => Ok(Self::G),
            "piece" => Ok(Self::Piece),
            other => Err(CatalogError::UnknownBaseUnit(other.to_string())),
        }
    }
}

/// How an item's `counted_partial_units` is interpreted.
///
/// Chosen per item at catalog setup, never inferred from the item's
/// category. A cased wine (12 bottles/case) counts the open case as a
/// fraction; a keg (88 pints) counts loose pints directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UomStrategy {
    /// Partial is a fraction of one purchase unit in `[0, 1)`.
    FractionalRemainder,
    /// Partial is an absolute count of loose base units (may exceed
    /// one purchase unit's worth).
    AbsoluteSubunitCount,
}

impl UomStrategy {
    /// Returns the stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FractionalRemainder => "FRACTIONAL_REMAINDER",
            Self::AbsoluteSubunitCount => "ABSOLUTE_SUBUNIT_COUNT",
        }
    }
}

impl std::fmt::Display for UomStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UomStrategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FRACTIONAL_REMAINDER" => Ok(Self::FractionalRemainder),
            "ABSOLUTE_SUBUNIT_COUNT" => Ok(Self::AbsoluteSubunitCount),
            other => Err(CatalogError::UnknownUomStrategy(other.to_string())),
        }
    }
}

/// Input for creating a stock category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// The hotel this category belongs to.
    pub hotel_id: HotelId,
    /// Display name, unique within the hotel.
    pub name: String,
    /// Position in reports (ascending).
    pub sort_order: i32,
}

/// Input for creating a stock item.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// The hotel this item belongs to.
    pub hotel_id: HotelId,
    /// Optional reporting category.
    pub category_id: Option<CategoryId>,
    /// Stock-keeping unit, unique within the hotel.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Purchase-unit-to-base-unit multiplier (e.g. 12 bottles/case).
    pub uom: Decimal,
    /// How partial counts are interpreted for this item.
    pub uom_strategy: UomStrategy,
    /// Base unit quantities are stored in.
    pub base_unit: BaseUnit,
    /// Cost per purchase unit.
    pub unit_cost: Decimal,
}

/// Validates a new category before persistence.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn validate_new_category(input: &NewCategory) -> Result<(), CatalogError> {
    if input.name.trim().is_empty() {
        return Err(CatalogError::EmptyCategoryName);
    }
    Ok(())
}

/// Validates a new item's configuration before persistence.
///
/// # Errors
///
/// Returns an error if the SKU or name is blank, the UOM multiplier is
/// not positive, or the unit cost is negative.
pub fn validate_new_item(input: &NewItem) -> Result<(), CatalogError> {
    if input.sku.trim().is_empty() {
        return Err(CatalogError::EmptySku);
    }
    if input.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    super::conversion::validate_uom(input.uom)?;
    super::conversion::validate_unit_cost(input.unit_cost)?;
    Ok(())
}
