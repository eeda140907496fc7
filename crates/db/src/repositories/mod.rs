//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod catalog;
pub mod movement;
pub mod stocktake;

pub use catalog::{CatalogRepoError, CatalogRepository};
pub use movement::{MovementFilter, MovementRepoError, MovementRepository, RecordedMovement};
pub use stocktake::{
    ApprovedStocktake, StocktakeRepoError, StocktakeRepository, StocktakeWithLines,
};
