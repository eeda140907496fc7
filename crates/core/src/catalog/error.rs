//! Catalog error types for item configuration and count conversion.

use bartally_shared::{DomainError, ErrorKind};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the catalog and UOM model.
#[derive(Debug, Error)]
pub enum CatalogError {
    // ========== Item Configuration Errors ==========
    /// UOM multiplier must be greater than zero.
    #[error("UOM multiplier must be greater than zero, got {0}")]
    NonPositiveUom(Decimal),

    /// Unit cost cannot be negative.
    #[error("Unit cost cannot be negative, got {0}")]
    NegativeUnitCost(Decimal),

    /// Item SKU cannot be empty.
    #[error("Item SKU cannot be empty")]
    EmptySku,

    /// Item name cannot be empty.
    #[error("Item name cannot be empty")]
    EmptyName,

    /// Category name cannot be empty.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    // ========== Count Conversion Errors ==========
    /// Full-unit count cannot be negative.
    #[error("Full-unit count cannot be negative, got {0}")]
    NegativeFullUnits(i64),

    /// Partial-unit count cannot be negative.
    #[error("Partial-unit count cannot be negative, got {0}")]
    NegativePartialUnits(Decimal),

    /// Fractional partial count must be below one whole purchase unit.
    #[error("Fractional partial count must be below 1, got {0}")]
    PartialNotFraction(Decimal),

    // ========== Parse Errors ==========
    /// Unknown base unit string.
    #[error("Unknown base unit: {0}")]
    UnknownBaseUnit(String),

    /// Unknown UOM strategy string.
    #[error("Unknown UOM strategy: {0}")]
    UnknownUomStrategy(String),
}

impl CatalogError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveUom(_) => "NON_POSITIVE_UOM",
            Self::NegativeUnitCost(_) => "NEGATIVE_UNIT_COST",
            Self::EmptySku => "EMPTY_SKU",
            Self::EmptyName => "EMPTY_NAME",
            Self::EmptyCategoryName => "EMPTY_CATEGORY_NAME",
            Self::NegativeFullUnits(_) => "NEGATIVE_FULL_UNITS",
            Self::NegativePartialUnits(_) => "NEGATIVE_PARTIAL_UNITS",
            Self::PartialNotFraction(_) => "PARTIAL_NOT_FRACTION",
            Self::UnknownBaseUnit(_) => "UNKNOWN_BASE_UNIT",
            Self::UnknownUomStrategy(_) => "UNKNOWN_UOM_STRATEGY",
        }
    }
}

impl DomainError for CatalogError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    fn error_code(&self) -> &'static str {
        self.code()
    }
}
