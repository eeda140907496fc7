//! Initial schema for the beverage inventory ledger.
//!
//! Creates the catalog tables (stock_categories, stock_items), the
//! append-only stock_movements ledger, and the stocktake tables
//! (stocktakes, stocktake_lines).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockCategories::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockCategories::HotelId).uuid().not_null())
                    .col(ColumnDef::new(StockCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(StockCategories::SortOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockCategories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_stock_categories_hotel_name")
                    .table(StockCategories::Table)
                    .col(StockCategories::HotelId)
                    .col(StockCategories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockItems::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockItems::HotelId).uuid().not_null())
                    .col(ColumnDef::new(StockItems::CategoryId).uuid().null())
                    .col(ColumnDef::new(StockItems::Sku).string().not_null())
                    .col(ColumnDef::new(StockItems::Name).string().not_null())
                    .col(
                        ColumnDef::new(StockItems::Uom)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockItems::UomStrategy).string().not_null())
                    .col(ColumnDef::new(StockItems::BaseUnit).string().not_null())
                    .col(
                        ColumnDef::new(StockItems::UnitCost)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockItems::CurrentQty)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockItems::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(StockItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_items_category_id")
                            .from(StockItems::Table, StockItems::CategoryId)
                            .to(StockCategories::Table, StockCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_stock_items_hotel_sku")
                    .table(StockItems::Table)
                    .col(StockItems::HotelId)
                    .col(StockItems::Sku)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_items_hotel_active")
                    .table(StockItems::Table)
                    .col(StockItems::HotelId)
                    .col(StockItems::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockMovements::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovements::HotelId).uuid().not_null())
                    .col(ColumnDef::new(StockMovements::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(StockMovements::MovementType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockMovements::Quantity)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockMovements::UnitCost)
                            .decimal_len(19, 6)
                            .null(),
                    )
                    .col(ColumnDef::new(StockMovements::Reference).string().null())
                    .col(ColumnDef::new(StockMovements::Notes).text().null())
                    .col(
                        ColumnDef::new(StockMovements::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovements::RecordedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(StockMovements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_item_id")
                            .from(StockMovements::Table, StockMovements::ItemId)
                            .to(StockItems::Table, StockItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_item_occurred")
                    .table(StockMovements::Table)
                    .col(StockMovements::ItemId)
                    .col(StockMovements::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_hotel_occurred")
                    .table(StockMovements::Table)
                    .col(StockMovements::HotelId)
                    .col(StockMovements::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_hotel_reference")
                    .table(StockMovements::Table)
                    .col(StockMovements::HotelId)
                    .col(StockMovements::Reference)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stocktakes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stocktakes::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Stocktakes::HotelId).uuid().not_null())
                    .col(
                        ColumnDef::new(Stocktakes::PeriodStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stocktakes::PeriodEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Stocktakes::Status).string().not_null())
                    .col(ColumnDef::new(Stocktakes::Notes).text().null())
                    .col(ColumnDef::new(Stocktakes::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Stocktakes::ApprovedBy).uuid().null())
                    .col(
                        ColumnDef::new(Stocktakes::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Stocktakes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stocktakes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_stocktakes_hotel_period")
                    .table(Stocktakes::Table)
                    .col(Stocktakes::HotelId)
                    .col(Stocktakes::PeriodStart)
                    .col(Stocktakes::PeriodEnd)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stocktakes_hotel_status")
                    .table(Stocktakes::Table)
                    .col(Stocktakes::HotelId)
                    .col(Stocktakes::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StocktakeLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StocktakeLines::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StocktakeLines::StocktakeId).uuid().not_null())
                    .col(ColumnDef::new(StocktakeLines::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(StocktakeLines::OpeningQty)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::Purchases)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::Sales)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::Waste)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::TransfersIn)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::TransfersOut)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::Adjustments)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::ValuationCost)
                            .decimal_len(19, 6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::CountedFullUnits)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::CountedPartialUnits)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::CountedQty)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::ExpectedQty)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::VarianceQty)
                            .decimal_len(19, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::ExpectedValue)
                            .decimal_len(19, 10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::CountedValue)
                            .decimal_len(19, 10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::VarianceValue)
                            .decimal_len(19, 10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StocktakeLines::CountedBy).uuid().null())
                    .col(
                        ColumnDef::new(StocktakeLines::CountedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StocktakeLines::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stocktake_lines_stocktake_id")
                            .from(StocktakeLines::Table, StocktakeLines::StocktakeId)
                            .to(Stocktakes::Table, Stocktakes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stocktake_lines_item_id")
                            .from(StocktakeLines::Table, StocktakeLines::ItemId)
                            .to(StockItems::Table, StockItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_stocktake_lines_stocktake_item")
                    .table(StocktakeLines::Table)
                    .col(StocktakeLines::StocktakeId)
                    .col(StocktakeLines::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stocktake_lines_item")
                    .table(StocktakeLines::Table)
                    .col(StocktakeLines::ItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StocktakeLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stocktakes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockMovements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StockCategories {
    Table,
    Id,
    HotelId,
    Name,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StockItems {
    Table,
    Id,
    HotelId,
    CategoryId,
    Sku,
    Name,
    Uom,
    UomStrategy,
    BaseUnit,
    UnitCost,
    CurrentQty,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StockMovements {
    Table,
    Id,
    HotelId,
    ItemId,
    MovementType,
    Quantity,
    UnitCost,
    Reference,
    Notes,
    OccurredAt,
    RecordedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Stocktakes {
    Table,
    Id,
    HotelId,
    PeriodStart,
    PeriodEnd,
    Status,
    Notes,
    CreatedBy,
    ApprovedBy,
    ApprovedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StocktakeLines {
    Table,
    Id,
    StocktakeId,
    ItemId,
    OpeningQty,
    Purchases,
    Sales,
    Waste,
    TransfersIn,
    TransfersOut,
    Adjustments,
    ValuationCost,
    CountedFullUnits,
    CountedPartialUnits,
    CountedQty,
    ExpectedQty,
    VarianceQty,
    ExpectedValue,
    CountedValue,
    VarianceValue,
    CountedBy,
    CountedAt,
    CreatedAt,
    UpdatedAt,
}
