//! `SeaORM` Entity for the stocktake_lines table.
//!
//! The opening balance, per-type period sums, and valuation cost are
//! frozen at populate time. The derived columns are pure functions of
//! the frozen basis and the two count inputs, recomputed on every
//! count update.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stocktake_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub stocktake_id: Uuid,
    pub item_id: Uuid,
    /// Signed ledger sum strictly before the period start.
    pub opening_qty: Decimal,
    pub purchases: Decimal,
    pub sales: Decimal,
    pub waste: Decimal,
    pub transfers_in: Decimal,
    pub transfers_out: Decimal,
    /// Net signed adjustment sum over the period.
    pub adjustments: Decimal,
    /// Cost per base unit frozen at populate time.
    pub valuation_cost: Decimal,
    pub counted_full_units: i64,
    pub counted_partial_units: Decimal,
    pub counted_qty: Decimal,
    pub expected_qty: Decimal,
    pub variance_qty: Decimal,
    pub expected_value: Decimal,
    pub counted_value: Decimal,
    pub variance_value: Decimal,
    pub counted_by: Option<Uuid>,
    pub counted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stocktakes::Entity",
        from = "Column::StocktakeId",
        to = "super::stocktakes::Column::Id"
    )]
    Stocktakes,
    #[sea_orm(
        belongs_to = "super::stock_items::Entity",
        from = "Column::ItemId",
        to = "super::stock_items::Column::Id"
    )]
    StockItems,
}

impl Related<super::stocktakes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stocktakes.def()
    }
}

impl Related<super::stock_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
