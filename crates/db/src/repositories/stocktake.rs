//! Stocktake repository: lifecycle, line population, counting, and the
//! approval engine.
//!
//! Approval is the only path out of DRAFT. It flips the status with a
//! guarded conditional update before posting any adjustment, so two
//! concurrent approvers can never both reconcile.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info};

use bartally_core::catalog::{CatalogError, UomStrategy, cost_per_base_unit};
use bartally_core::events::{Event, EventSender};
use bartally_core::ledger::MovementSums;
use bartally_core::stocktake::{
    CategoryRollup, LineBasis, LineValue, NewStocktake, StockPeriod, StocktakeError,
    StocktakeStatus, derive_line, rollup,
};
use bartally_shared::types::{
    CategoryId, HotelId, ItemId, LineId, PageRequest, PageResponse, StaffId, StocktakeId,
};
use bartally_shared::{DomainError, ErrorKind};

use crate::entities::{stock_categories, stock_items, stocktake_lines, stocktakes};
use crate::repositories::movement::{self, MovementRepoError};

/// Error types for stocktake operations.
#[derive(Debug, thiserror::Error)]
pub enum StocktakeRepoError {
    /// A stocktake lifecycle rule was violated.
    #[error(transparent)]
    Lifecycle(#[from] StocktakeError),

    /// A count or configuration value was rejected.
    #[error(transparent)]
    Invalid(#[from] CatalogError),

    /// A ledger read or write failed.
    #[error(transparent)]
    Movement(#[from] MovementRepoError),

    /// Stocktake not found in the hotel.
    #[error("Stocktake not found: {0}")]
    NotFound(StocktakeId),

    /// Line not found in the hotel.
    #[error("Stocktake line not found: {0}")]
    LineNotFound(LineId),

    /// The line references an item the hotel no longer has.
    #[error("Stock item not found: {0}")]
    ItemNotFound(ItemId),

    /// A stocktake already covers this exact period.
    #[error("A stocktake for this hotel already covers {start} to {end}")]
    DuplicatePeriod {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The hotel has no active items to count.
    #[error("Hotel {0} has no active items to populate a stocktake with")]
    NoActiveItems(HotelId),

    /// An adjustment could not be posted for a specific line.
    #[error("Adjustment for line {line_id} (item {item_id}) failed: {source}")]
    AdjustmentFailed {
        line_id: LineId,
        item_id: ItemId,
        #[source]
        source: MovementRepoError,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DomainError for StocktakeRepoError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Lifecycle(inner) => inner.kind(),
            Self::Invalid(inner) => inner.kind(),
            Self::Movement(inner) => inner.kind(),
            Self::NotFound(_) | Self::LineNotFound(_) | Self::ItemNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::DuplicatePeriod { .. } => ErrorKind::Conflict,
            Self::NoActiveItems(_) => ErrorKind::Validation,
            Self::AdjustmentFailed { source, .. } => source.kind(),
            Self::Database(_) => ErrorKind::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Lifecycle(inner) => inner.error_code(),
            Self::Invalid(inner) => inner.error_code(),
            Self::Movement(inner) => inner.error_code(),
            Self::NotFound(_) => "STOCKTAKE_NOT_FOUND",
            Self::LineNotFound(_) => "LINE_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::DuplicatePeriod { .. } => "DUPLICATE_PERIOD",
            Self::NoActiveItems(_) => "NO_ACTIVE_ITEMS",
            Self::AdjustmentFailed { source, .. } => source.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// A stocktake with its lines, ordered by item id for determinism.
#[derive(Debug, Clone)]
pub struct StocktakeWithLines {
    /// The stocktake header.
    pub stocktake: stocktakes::Model,
    /// Its lines; empty until populated.
    pub lines: Vec<stocktake_lines::Model>,
}

/// The outcome of an approval.
#[derive(Debug, Clone)]
pub struct ApprovedStocktake {
    /// The stocktake, now APPROVED.
    pub stocktake: stocktakes::Model,
    /// How many adjustment movements the reconciliation posted.
    pub adjustments_posted: u64,
}

/// Stocktake repository.
#[derive(Debug, Clone)]
pub struct StocktakeRepository {
    db: DatabaseConnection,
    events: Option<EventSender>,
}

impl StocktakeRepository {
    /// Creates a new stocktake repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db, events: None }
    }

    /// Creates a repository that announces lifecycle changes on the
    /// given event channel.
    #[must_use]
    pub const fn with_events(db: DatabaseConnection, events: EventSender) -> Self {
        Self {
            db,
            events: Some(events),
        }
    }

    /// Creates a DRAFT stocktake over a counting period.
    ///
    /// # Errors
    ///
    /// Returns an error if another stocktake in the hotel already
    /// covers the exact same period, or a database operation fails.
    pub async fn create(
        &self,
        input: NewStocktake,
        created_by: StaffId,
    ) -> Result<stocktakes::Model, StocktakeRepoError> {
        let existing = stocktakes::Entity::find()
            .filter(stocktakes::Column::HotelId.eq(input.hotel_id.into_inner()))
            .filter(stocktakes::Column::PeriodStart.eq(input.period.start))
            .filter(stocktakes::Column::PeriodEnd.eq(input.period.end))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(StocktakeRepoError::DuplicatePeriod {
                start: input.period.start,
                end: input.period.end,
            });
        }

        let now = Utc::now();
        let stocktake = stocktakes::ActiveModel {
            id: Set(StocktakeId::new().into_inner()),
            hotel_id: Set(input.hotel_id.into_inner()),
            period_start: Set(input.period.start.into()),
            period_end: Set(input.period.end.into()),
            status: Set(StocktakeStatus::Draft.as_str().to_string()),
            notes: Set(input.notes),
            created_by: Set(created_by.into_inner()),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StocktakeRepoError::DuplicatePeriod {
                start: input.period.start,
                end: input.period.end,
            },
            _ => StocktakeRepoError::Database(err),
        })?;

        info!(
            stocktake_id = %stocktake.id,
            hotel_id = %stocktake.hotel_id,
            period_start = %stocktake.period_start,
            period_end = %stocktake.period_end,
            "stocktake created"
        );

        Ok(stocktake)
    }

    /// Gets a stocktake with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the stocktake does not exist in the hotel or
    /// the query fails.
    pub async fn get(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
    ) -> Result<StocktakeWithLines, StocktakeRepoError> {
        let stocktake = self.find_stocktake(hotel_id, stocktake_id).await?;
        let lines = self.find_lines(stocktake_id).await?;

        Ok(StocktakeWithLines { stocktake, lines })
    }

    /// Lists stocktakes newest period first, optionally by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        hotel_id: HotelId,
        status: Option<StocktakeStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<stocktakes::Model>, StocktakeRepoError> {
        let mut query = stocktakes::Entity::find()
            .filter(stocktakes::Column::HotelId.eq(hotel_id.into_inner()));
        if let Some(status) = status {
            query = query.filter(stocktakes::Column::Status.eq(status.as_str()));
        }

        let total = query.clone().count(&self.db).await?;

        let stocktakes = query
            .order_by_desc(stocktakes::Column::PeriodStart)
            .order_by_desc(stocktakes::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            stocktakes,
            page.page,
            page.per_page,
            total,
        ))
    }

    /// Populates a DRAFT stocktake with one line per active item.
    ///
    /// Freezes, per item, the opening balance (ledger sum strictly
    /// before the period start), the per-type sums over the period, and
    /// the valuation cost derived from the item's current unit cost.
    /// Counts start at zero. All lines insert in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The stocktake does not exist in the hotel
    /// - The stocktake is APPROVED or already has lines
    /// - The hotel has no active items
    /// - A database operation fails
    pub async fn populate(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
    ) -> Result<StocktakeWithLines, StocktakeRepoError> {
        let stocktake = self.find_stocktake(hotel_id, stocktake_id).await?;
        let status: StocktakeStatus = stocktake.status.parse()?;
        status.ensure_editable(stocktake_id)?;

        let existing = stocktake_lines::Entity::find()
            .filter(stocktake_lines::Column::StocktakeId.eq(stocktake_id.into_inner()))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(StocktakeError::LinesAlreadyPopulated(stocktake_id).into());
        }

        let items = stock_items::Entity::find()
            .filter(stock_items::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stock_items::Column::IsActive.eq(true))
            .order_by_asc(stock_items::Column::Id)
            .all(&self.db)
            .await?;
        if items.is_empty() {
            return Err(StocktakeRepoError::NoActiveItems(hotel_id));
        }

        let period = stocktake_period(&stocktake)?;

        let txn = self.db.begin().await?;

        // Re-check the status under a row write so a concurrent
        // approval cannot slip between the check and the inserts.
        touch_draft(&txn, hotel_id, stocktake_id).await?;

        let basis = movement::ledger_basis_for_period(&txn, hotel_id, &period).await?;

        let now = Utc::now();
        let mut models = Vec::with_capacity(items.len());
        for item in &items {
            let uom_strategy: UomStrategy = item.uom_strategy.parse()?;
            let valuation_cost = cost_per_base_unit(item.unit_cost, item.uom)?;
            let (opening_qty, sums) = basis
                .get(&ItemId::from_uuid(item.id))
                .copied()
                .unwrap_or_default();

            let line_basis = LineBasis {
                uom: item.uom,
                uom_strategy,
                opening_qty,
                sums,
                valuation_cost,
            };
            let totals = derive_line(&line_basis, 0, Decimal::ZERO)?;

            models.push(stocktake_lines::ActiveModel {
                id: Set(LineId::new().into_inner()),
                stocktake_id: Set(stocktake_id.into_inner()),
                item_id: Set(item.id),
                opening_qty: Set(opening_qty),
                purchases: Set(sums.purchases),
                sales: Set(sums.sales),
                waste: Set(sums.waste),
                transfers_in: Set(sums.transfers_in),
                transfers_out: Set(sums.transfers_out),
                adjustments: Set(sums.adjustments),
                valuation_cost: Set(valuation_cost),
                counted_full_units: Set(0),
                counted_partial_units: Set(Decimal::ZERO),
                counted_qty: Set(totals.counted_qty),
                expected_qty: Set(totals.expected_qty),
                variance_qty: Set(totals.variance_qty),
                expected_value: Set(totals.expected_value),
                counted_value: Set(totals.counted_value),
                variance_value: Set(totals.variance_value),
                counted_by: Set(None),
                counted_at: Set(None),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            });
        }

        let line_count = models.len() as u64;
        stocktake_lines::Entity::insert_many(models)
            .exec(&txn)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    StocktakeError::LinesAlreadyPopulated(stocktake_id).into()
                }
                _ => StocktakeRepoError::Database(err),
            })?;
        txn.commit().await?;

        info!(
            stocktake_id = %stocktake_id,
            hotel_id = %hotel_id,
            line_count,
            "stocktake populated"
        );

        if let Some(events) = &self.events {
            events.emit(Event::StocktakePopulated {
                hotel_id,
                stocktake_id,
                line_count,
            });
        }

        self.get(hotel_id, stocktake_id).await
    }

    /// Records a physical count against a line and recomputes every
    /// derived field in the same update.
    ///
    /// Only the two count inputs are writable; the frozen basis and the
    /// derived fields never take caller-supplied values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The line does not exist in the hotel
    /// - The parent stocktake is APPROVED
    /// - The counts are negative, or the fractional partial is not
    ///   below one
    /// - A database operation fails
    pub async fn update_line_count(
        &self,
        hotel_id: HotelId,
        line_id: LineId,
        counted_full_units: i64,
        counted_partial_units: Decimal,
        counted_by: StaffId,
    ) -> Result<stocktake_lines::Model, StocktakeRepoError> {
        let line = stocktake_lines::Entity::find_by_id(line_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(StocktakeRepoError::LineNotFound(line_id))?;

        // Tenancy check goes through the parent; a foreign hotel's line
        // is indistinguishable from a missing one.
        let stocktake = stocktakes::Entity::find_by_id(line.stocktake_id)
            .filter(stocktakes::Column::HotelId.eq(hotel_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(StocktakeRepoError::LineNotFound(line_id))?;
        let status: StocktakeStatus = stocktake.status.parse()?;
        status.ensure_editable(StocktakeId::from_uuid(stocktake.id))?;

        let item = stock_items::Entity::find_by_id(line.item_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StocktakeRepoError::ItemNotFound(ItemId::from_uuid(line.item_id)))?;

        let basis = LineBasis {
            uom: item.uom,
            uom_strategy: item.uom_strategy.parse()?,
            opening_qty: line.opening_qty,
            sums: MovementSums {
                purchases: line.purchases,
                sales: line.sales,
                waste: line.waste,
                transfers_in: line.transfers_in,
                transfers_out: line.transfers_out,
                adjustments: line.adjustments,
            },
            valuation_cost: line.valuation_cost,
        };
        let totals = derive_line(&basis, counted_full_units, counted_partial_units)?;

        let now = Utc::now();
        let mut line: stocktake_lines::ActiveModel = line.into();
        line.counted_full_units = Set(counted_full_units);
        line.counted_partial_units = Set(counted_partial_units);
        line.counted_qty = Set(totals.counted_qty);
        line.expected_qty = Set(totals.expected_qty);
        line.variance_qty = Set(totals.variance_qty);
        line.expected_value = Set(totals.expected_value);
        line.counted_value = Set(totals.counted_value);
        line.variance_value = Set(totals.variance_value);
        line.counted_by = Set(Some(counted_by.into_inner()));
        line.counted_at = Set(Some(now.into()));
        line.updated_at = Set(now.into());
        let line = line.update(&self.db).await?;

        debug!(
            line_id = %line.id,
            stocktake_id = %line.stocktake_id,
            variance_qty = %line.variance_qty,
            "line counted"
        );

        if let Some(events) = &self.events {
            events.emit(Event::StocktakeLineCounted {
                hotel_id,
                stocktake_id: StocktakeId::from_uuid(line.stocktake_id),
                line_id,
                item_id: ItemId::from_uuid(line.item_id),
                variance_qty: line.variance_qty,
            });
        }

        Ok(line)
    }

    /// Approves a DRAFT stocktake and reconciles the ledger to the
    /// physical count, all in one transaction.
    ///
    /// The status flips first via a guarded conditional update; a
    /// concurrent approver finds zero rows to flip and fails without
    /// posting anything. Every line with a non-zero variance then posts
    /// an ADJUSTMENT movement carrying the signed variance at the
    /// line's valuation cost, which brings the item's `current_qty` to
    /// exactly the counted quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The stocktake does not exist in the hotel
    /// - The stocktake is already APPROVED, or another approver wins
    ///   the race
    /// - Any adjustment fails to post (nothing applies)
    /// - A database operation fails
    pub async fn approve(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
        approved_by: StaffId,
    ) -> Result<ApprovedStocktake, StocktakeRepoError> {
        use sea_orm::sea_query::Expr;

        let stocktake = self.find_stocktake(hotel_id, stocktake_id).await?;
        let status: StocktakeStatus = stocktake.status.parse()?;
        status.ensure_editable(stocktake_id)?;

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let flipped = stocktakes::Entity::update_many()
            .col_expr(
                stocktakes::Column::Status,
                Expr::value(StocktakeStatus::Approved.as_str()),
            )
            .col_expr(
                stocktakes::Column::ApprovedBy,
                Expr::value(Some(approved_by.into_inner())),
            )
            .col_expr(stocktakes::Column::ApprovedAt, Expr::value(Some(now)))
            .col_expr(stocktakes::Column::UpdatedAt, Expr::value(now))
            .filter(stocktakes::Column::Id.eq(stocktake_id.into_inner()))
            .filter(stocktakes::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stocktakes::Column::Status.eq(StocktakeStatus::Draft.as_str()))
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            return Err(StocktakeError::AlreadyApproved(stocktake_id).into());
        }

        let lines = stocktake_lines::Entity::find()
            .filter(stocktake_lines::Column::StocktakeId.eq(stocktake_id.into_inner()))
            .order_by_asc(stocktake_lines::Column::ItemId)
            .all(&txn)
            .await?;

        let mut adjustments_posted: u64 = 0;
        for line in &lines {
            if line.variance_qty == Decimal::ZERO {
                continue;
            }
            movement::record_adjustment(
                &txn,
                hotel_id,
                ItemId::from_uuid(line.item_id),
                line.variance_qty,
                line.valuation_cost,
                stocktake_id,
                approved_by,
            )
            .await
            .map_err(|source| StocktakeRepoError::AdjustmentFailed {
                line_id: LineId::from_uuid(line.id),
                item_id: ItemId::from_uuid(line.item_id),
                source,
            })?;
            adjustments_posted += 1;
        }

        txn.commit().await?;

        info!(
            stocktake_id = %stocktake_id,
            hotel_id = %hotel_id,
            adjustments_posted,
            "stocktake approved"
        );

        if let Some(events) = &self.events {
            events.emit(Event::StocktakeApproved {
                hotel_id,
                stocktake_id,
                adjustments_posted,
            });
        }

        let stocktake = self.find_stocktake(hotel_id, stocktake_id).await?;
        Ok(ApprovedStocktake {
            stocktake,
            adjustments_posted,
        })
    }

    /// Updates a DRAFT stocktake's notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the stocktake does not exist in the hotel,
    /// is APPROVED, or the update fails.
    pub async fn update_notes(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
        notes: Option<String>,
    ) -> Result<stocktakes::Model, StocktakeRepoError> {
        let stocktake = self.find_stocktake(hotel_id, stocktake_id).await?;
        let status: StocktakeStatus = stocktake.status.parse()?;
        status.ensure_editable(stocktake_id)?;

        let mut stocktake: stocktakes::ActiveModel = stocktake.into();
        stocktake.notes = Set(notes);
        stocktake.updated_at = Set(Utc::now().into());
        let stocktake = stocktake.update(&self.db).await?;

        Ok(stocktake)
    }

    /// Deletes a DRAFT stocktake and its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the stocktake does not exist in the hotel,
    /// is APPROVED, or the delete fails.
    pub async fn delete(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
    ) -> Result<(), StocktakeRepoError> {
        let stocktake = self.find_stocktake(hotel_id, stocktake_id).await?;
        let status: StocktakeStatus = stocktake.status.parse()?;
        status.ensure_editable(stocktake_id)?;

        stocktakes::Entity::delete_by_id(stocktake_id.into_inner())
            .exec(&self.db)
            .await?;

        info!(
            stocktake_id = %stocktake_id,
            hotel_id = %hotel_id,
            "stocktake deleted"
        );

        Ok(())
    }

    /// Groups a stocktake's lines by category and sums the three value
    /// columns per category, plus a grand total.
    ///
    /// Always recomputed from current line state, so draft totals track
    /// counting progress and approved totals are final.
    ///
    /// # Errors
    ///
    /// Returns an error if the stocktake does not exist in the hotel or
    /// a query fails.
    pub async fn category_totals(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
    ) -> Result<CategoryRollup, StocktakeRepoError> {
        self.find_stocktake(hotel_id, stocktake_id).await?;
        let lines = self.find_lines(stocktake_id).await?;

        let item_ids: Vec<_> = lines.iter().map(|line| line.item_id).collect();
        let items = stock_items::Entity::find()
            .filter(stock_items::Column::Id.is_in(item_ids))
            .all(&self.db)
            .await?;
        let category_by_item: HashMap<_, _> = items
            .iter()
            .map(|item| (item.id, item.category_id))
            .collect();

        let category_ids: Vec<_> = items.iter().filter_map(|item| item.category_id).collect();
        let categories = stock_categories::Entity::find()
            .filter(stock_categories::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?;
        let category_info: HashMap<_, _> = categories
            .iter()
            .map(|category| (category.id, (category.name.clone(), category.sort_order)))
            .collect();

        let values = lines
            .iter()
            .map(|line| {
                let category_id = category_by_item.get(&line.item_id).copied().flatten();
                let (category_name, category_sort_order) = category_id
                    .and_then(|id| category_info.get(&id).cloned())
                    .map_or((None, None), |(name, sort_order)| {
                        (Some(name), Some(sort_order))
                    });

                LineValue {
                    category_id: category_id.map(CategoryId::from_uuid),
                    category_name,
                    category_sort_order,
                    expected_value: line.expected_value,
                    counted_value: line.counted_value,
                    variance_value: line.variance_value,
                }
            })
            .collect();

        Ok(rollup(values))
    }

    async fn find_stocktake(
        &self,
        hotel_id: HotelId,
        stocktake_id: StocktakeId,
    ) -> Result<stocktakes::Model, StocktakeRepoError> {
        stocktakes::Entity::find_by_id(stocktake_id.into_inner())
            .filter(stocktakes::Column::HotelId.eq(hotel_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(StocktakeRepoError::NotFound(stocktake_id))
    }

    async fn find_lines(
        &self,
        stocktake_id: StocktakeId,
    ) -> Result<Vec<stocktake_lines::Model>, StocktakeRepoError> {
        let lines = stocktake_lines::Entity::find()
            .filter(stocktake_lines::Column::StocktakeId.eq(stocktake_id.into_inner()))
            .order_by_asc(stocktake_lines::Column::ItemId)
            .all(&self.db)
            .await?;

        Ok(lines)
    }
}

/// The stocktake's counting period, revalidated from its columns.
fn stocktake_period(stocktake: &stocktakes::Model) -> Result<StockPeriod, StocktakeRepoError> {
    let period = StockPeriod::new(
        stocktake.period_start.with_timezone(&Utc),
        stocktake.period_end.with_timezone(&Utc),
    )?;

    Ok(period)
}

/// Writes the stocktake row under a DRAFT guard, failing if a
/// concurrent approval got there first.
async fn touch_draft(
    txn: &DatabaseTransaction,
    hotel_id: HotelId,
    stocktake_id: StocktakeId,
) -> Result<(), StocktakeRepoError> {
    use sea_orm::sea_query::Expr;

    let touched = stocktakes::Entity::update_many()
        .col_expr(stocktakes::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(stocktakes::Column::Id.eq(stocktake_id.into_inner()))
        .filter(stocktakes::Column::HotelId.eq(hotel_id.into_inner()))
        .filter(stocktakes::Column::Status.eq(StocktakeStatus::Draft.as_str()))
        .exec(txn)
        .await?;

    if touched.rows_affected == 0 {
        return Err(StocktakeError::AlreadyApproved(stocktake_id).into());
    }
    Ok(())
}
