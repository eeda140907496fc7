//! `SeaORM` Entity for the stock_items table.
//!
//! `current_qty` is the denormalized running total in base units. Its
//! only writer is the movement repository's atomic increment; treat it
//! as a cache of the ledger everywhere else.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub category_id: Option<Uuid>,
    pub sku: String,
    pub name: String,
    /// Purchase-unit-to-base-unit multiplier.
    pub uom: Decimal,
    /// Stable string form of `bartally_core::catalog::UomStrategy`.
    pub uom_strategy: String,
    /// Stable string form of `bartally_core::catalog::BaseUnit`.
    pub base_unit: String,
    /// Cost per purchase unit.
    pub unit_cost: Decimal,
    /// Running total in base units; signed sum of all movements.
    pub current_qty: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_categories::Entity",
        from = "Column::CategoryId",
        to = "super::stock_categories::Column::Id"
    )]
    StockCategories,
    #[sea_orm(has_many = "super::stock_movements::Entity")]
    StockMovements,
    #[sea_orm(has_many = "super::stocktake_lines::Entity")]
    StocktakeLines,
}

impl Related<super::stock_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockCategories.def()
    }
}

impl Related<super::stock_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl Related<super::stocktake_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StocktakeLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
