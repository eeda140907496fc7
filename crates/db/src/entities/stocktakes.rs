//! `SeaORM` Entity for the stocktakes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stocktakes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_id: Uuid,
    /// Inclusive start of the counting period.
    pub period_start: DateTimeWithTimeZone,
    /// Exclusive end of the counting period.
    pub period_end: DateTimeWithTimeZone,
    /// Stable string form of `bartally_core::stocktake::StocktakeStatus`.
    pub status: String,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stocktake_lines::Entity")]
    StocktakeLines,
}

impl Related<super::stocktake_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StocktakeLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
