//! `SeaORM` Entity for the stock_movements table.
//!
//! Append-only. Rows are never updated or deleted; corrections are
//! posted as new offsetting movements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub item_id: Uuid,
    /// Stable string form of `bartally_core::ledger::MovementType`.
    pub movement_type: String,
    /// Signed contribution in base units.
    pub quantity: Decimal,
    /// Cost per base unit at the time of the movement.
    pub unit_cost: Option<Decimal>,
    /// Free-form document reference; doubles as an idempotency key.
    pub reference: Option<String>,
    pub notes: Option<String>,
    /// When the movement happened, which may predate its insertion.
    pub occurred_at: DateTimeWithTimeZone,
    pub recorded_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_items::Entity",
        from = "Column::ItemId",
        to = "super::stock_items::Column::Id"
    )]
    StockItems,
}

impl Related<super::stock_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
