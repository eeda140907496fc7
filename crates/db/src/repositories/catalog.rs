//! Catalog repository for stock categories and items.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use bartally_core::catalog::{
    CatalogError, NewCategory, NewItem, validate_new_category, validate_new_item,
    validate_unit_cost,
};
use bartally_shared::types::{CategoryId, HotelId, ItemId, PageRequest, PageResponse};
use bartally_shared::{DomainError, ErrorKind};

use crate::entities::{stock_categories, stock_items};

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogRepoError {
    /// A catalog business rule was violated.
    #[error(transparent)]
    Invalid(#[from] CatalogError),

    /// Category not found in the hotel.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Item not found in the hotel.
    #[error("Stock item not found: {0}")]
    ItemNotFound(ItemId),

    /// Another category in the hotel already has this name.
    #[error("Category name already in use: {0}")]
    DuplicateName(String),

    /// Another item in the hotel already has this SKU.
    #[error("SKU already in use: {0}")]
    DuplicateSku(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DomainError for CatalogRepoError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(inner) => inner.kind(),
            Self::CategoryNotFound(_) | Self::ItemNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateName(_) | Self::DuplicateSku(_) => ErrorKind::Conflict,
            Self::Database(_) => ErrorKind::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(inner) => inner.error_code(),
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::DuplicateName(_) => "DUPLICATE_CATEGORY_NAME",
            Self::DuplicateSku(_) => "DUPLICATE_SKU",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Catalog repository for category and item configuration.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is blank
    /// - Another category in the hotel already has this name
    /// - A database operation fails
    pub async fn create_category(
        &self,
        input: NewCategory,
    ) -> Result<stock_categories::Model, CatalogRepoError> {
        validate_new_category(&input)?;
        let name = input.name.trim().to_string();

        let existing = stock_categories::Entity::find()
            .filter(stock_categories::Column::HotelId.eq(input.hotel_id.into_inner()))
            .filter(stock_categories::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CatalogRepoError::DuplicateName(name));
        }

        let now = Utc::now();
        let category = stock_categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            hotel_id: Set(input.hotel_id.into_inner()),
            name: Set(name.clone()),
            sort_order: Set(input.sort_order),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|err| unique_conflict(err, CatalogRepoError::DuplicateName(name)))?;

        Ok(category)
    }

    /// Lists the hotel's categories in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_categories(
        &self,
        hotel_id: HotelId,
    ) -> Result<Vec<stock_categories::Model>, CatalogRepoError> {
        let categories = stock_categories::Entity::find()
            .filter(stock_categories::Column::HotelId.eq(hotel_id.into_inner()))
            .order_by_asc(stock_categories::Column::SortOrder)
            .order_by_asc(stock_categories::Column::Name)
            .all(&self.db)
            .await?;

        Ok(categories)
    }

    /// Creates a stock item with an empty ledger and zero on-hand
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The SKU or name is blank, the uom is not positive, or the
    ///   unit cost is negative
    /// - The referenced category does not exist in the hotel
    /// - Another item in the hotel already has this SKU
    /// - A database operation fails
    pub async fn create_item(
        &self,
        input: NewItem,
    ) -> Result<stock_items::Model, CatalogRepoError> {
        validate_new_item(&input)?;
        let sku = input.sku.trim().to_string();

        if let Some(category_id) = input.category_id {
            stock_categories::Entity::find_by_id(category_id.into_inner())
                .filter(stock_categories::Column::HotelId.eq(input.hotel_id.into_inner()))
                .one(&self.db)
                .await?
                .ok_or(CatalogRepoError::CategoryNotFound(category_id))?;
        }

        let existing = stock_items::Entity::find()
            .filter(stock_items::Column::HotelId.eq(input.hotel_id.into_inner()))
            .filter(stock_items::Column::Sku.eq(sku.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CatalogRepoError::DuplicateSku(sku));
        }

        let now = Utc::now();
        let item = stock_items::ActiveModel {
            id: Set(ItemId::new().into_inner()),
            hotel_id: Set(input.hotel_id.into_inner()),
            category_id: Set(input.category_id.map(CategoryId::into_inner)),
            sku: Set(sku.clone()),
            name: Set(input.name.trim().to_string()),
            uom: Set(input.uom),
            uom_strategy: Set(input.uom_strategy.as_str().to_string()),
            base_unit: Set(input.base_unit.as_str().to_string()),
            unit_cost: Set(input.unit_cost),
            current_qty: Set(Decimal::ZERO),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|err| unique_conflict(err, CatalogRepoError::DuplicateSku(sku)))?;

        Ok(item)
    }

    /// Gets an item by id, active or retired.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist in the hotel or the
    /// query fails.
    pub async fn get_item(
        &self,
        hotel_id: HotelId,
        item_id: ItemId,
    ) -> Result<stock_items::Model, CatalogRepoError> {
        stock_items::Entity::find_by_id(item_id.into_inner())
            .filter(stock_items::Column::HotelId.eq(hotel_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(CatalogRepoError::ItemNotFound(item_id))
    }

    /// Lists items by name, optionally restricted to active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_items(
        &self,
        hotel_id: HotelId,
        active_only: bool,
        page: PageRequest,
    ) -> Result<PageResponse<stock_items::Model>, CatalogRepoError> {
        let mut query = stock_items::Entity::find()
            .filter(stock_items::Column::HotelId.eq(hotel_id.into_inner()));
        if active_only {
            query = query.filter(stock_items::Column::IsActive.eq(true));
        }

        let total = query.clone().count(&self.db).await?;

        let items = query
            .order_by_asc(stock_items::Column::Name)
            .order_by_asc(stock_items::Column::Sku)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }

    /// Updates an item's unit cost.
    ///
    /// Takes effect for future stocktakes only; lines already populated
    /// keep the valuation cost captured at populate time.
    ///
    /// # Errors
    ///
    /// Returns an error if the cost is negative, the item does not
    /// exist in the hotel, or the update fails.
    pub async fn update_unit_cost(
        &self,
        hotel_id: HotelId,
        item_id: ItemId,
        unit_cost: Decimal,
    ) -> Result<stock_items::Model, CatalogRepoError> {
        validate_unit_cost(unit_cost)?;
        let item = self.get_item(hotel_id, item_id).await?;

        let mut item: stock_items::ActiveModel = item.into();
        item.unit_cost = Set(unit_cost);
        item.updated_at = Set(Utc::now().into());
        let item = item.update(&self.db).await?;

        Ok(item)
    }

    /// Activates or retires an item.
    ///
    /// Retired items take no new directional movements but remain
    /// countable in stocktakes already underway.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist in the hotel or the
    /// update fails.
    pub async fn set_active(
        &self,
        hotel_id: HotelId,
        item_id: ItemId,
        is_active: bool,
    ) -> Result<stock_items::Model, CatalogRepoError> {
        let item = self.get_item(hotel_id, item_id).await?;

        let mut item: stock_items::ActiveModel = item.into();
        item.is_active = Set(is_active);
        item.updated_at = Set(Utc::now().into());
        let item = item.update(&self.db).await?;

        Ok(item)
    }
}

/// Maps a unique-constraint violation to the given conflict error, so
/// insert races lost after the pre-check still surface as conflicts.
fn unique_conflict(err: DbErr, conflict: CatalogRepoError) -> CatalogRepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => CatalogRepoError::Database(err),
    }
}
