//! Movement repository for the append-only stock ledger.
//!
//! Every write couples the movement insert with an atomic increment of
//! the owning item's `current_qty` in one transaction, so the running
//! total never drifts from the ledger sum.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use bartally_core::events::{Event, EventSender};
use bartally_core::ledger::{
    LedgerError, MovementSums, MovementType, NewMovement, validate_adjustment_delta,
    validate_new_movement,
};
use bartally_core::stocktake::StockPeriod;
use bartally_shared::types::{
    HotelId, ItemId, MovementId, PageRequest, PageResponse, StaffId, StocktakeId,
};
use bartally_shared::{DomainError, ErrorKind};

use crate::entities::{stock_items, stock_movements};

/// Error types for ledger movement operations.
#[derive(Debug, thiserror::Error)]
pub enum MovementRepoError {
    /// A ledger business rule was violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// No active item with this id exists in the hotel.
    #[error("Stock item not found: {0}")]
    ItemNotFound(ItemId),

    /// Movement not found.
    #[error("Movement not found: {0}")]
    NotFound(MovementId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DomainError for MovementRepoError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Ledger(inner) => inner.kind(),
            Self::ItemNotFound(_) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(inner) => inner.error_code(),
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::NotFound(_) => "MOVEMENT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// A recorded movement together with the item's refreshed running
/// quantity, so callers never re-derive it.
#[derive(Debug, Clone)]
pub struct RecordedMovement {
    /// The inserted ledger row.
    pub movement: stock_movements::Model,
    /// The item's `current_qty` after this movement.
    pub current_qty: Decimal,
}

/// Filter options for listing movements.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    /// Restrict to one item.
    pub item_id: Option<ItemId>,
    /// Restrict to one movement type.
    pub movement_type: Option<MovementType>,
    /// Movements occurring at or after this instant.
    pub occurred_from: Option<DateTime<Utc>>,
    /// Movements occurring strictly before this instant.
    pub occurred_to: Option<DateTime<Utc>>,
}

/// Movement repository for ledger writes and queries.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    db: DatabaseConnection,
    events: Option<EventSender>,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db, events: None }
    }

    /// Creates a repository that announces recorded movements on the
    /// given event channel.
    #[must_use]
    pub const fn with_events(db: DatabaseConnection, events: EventSender) -> Self {
        Self {
            db,
            events: Some(events),
        }
    }

    /// Records a directional movement against an active item.
    ///
    /// Inserts the ledger row and increments the item's `current_qty`
    /// by the type's signed contribution, both in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The quantity is not strictly positive or the type is ADJUSTMENT
    /// - No active item with this id exists in the hotel
    /// - A database operation fails
    pub async fn record(&self, input: NewMovement) -> Result<RecordedMovement, MovementRepoError> {
        validate_new_movement(&input)?;

        // Retired items take no new directional stock.
        let item = stock_items::Entity::find_by_id(input.item_id.into_inner())
            .filter(stock_items::Column::HotelId.eq(input.hotel_id.into_inner()))
            .filter(stock_items::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(MovementRepoError::ItemNotFound(input.item_id))?;

        let signed_quantity = input.movement_type.signed(input.quantity);

        let txn = self.db.begin().await?;
        let movement = insert_movement(&txn, &input, signed_quantity).await?;
        increment_current_qty(&txn, input.item_id, signed_quantity).await?;
        let current_qty = read_current_qty(&txn, input.item_id).await?;
        txn.commit().await?;

        info!(
            movement_id = %movement.id,
            item_id = %item.id,
            movement_type = %input.movement_type,
            quantity = %signed_quantity,
            "movement recorded"
        );

        if let Some(events) = &self.events {
            events.emit(Event::MovementRecorded {
                hotel_id: input.hotel_id,
                movement_id: MovementId::from_uuid(movement.id),
                item_id: input.item_id,
                movement_type: input.movement_type,
                quantity: signed_quantity,
            });
        }

        Ok(RecordedMovement {
            movement,
            current_qty,
        })
    }

    /// Gets a movement by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement does not exist in the hotel or
    /// the query fails.
    pub async fn get(
        &self,
        hotel_id: HotelId,
        movement_id: MovementId,
    ) -> Result<stock_movements::Model, MovementRepoError> {
        stock_movements::Entity::find_by_id(movement_id.into_inner())
            .filter(stock_movements::Column::HotelId.eq(hotel_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(MovementRepoError::NotFound(movement_id))
    }

    /// Lists movements newest-first with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        hotel_id: HotelId,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<stock_movements::Model>, MovementRepoError> {
        let mut query = stock_movements::Entity::find()
            .filter(stock_movements::Column::HotelId.eq(hotel_id.into_inner()));

        if let Some(item_id) = filter.item_id {
            query = query.filter(stock_movements::Column::ItemId.eq(item_id.into_inner()));
        }
        if let Some(movement_type) = filter.movement_type {
            query = query.filter(stock_movements::Column::MovementType.eq(movement_type.as_str()));
        }
        if let Some(from) = filter.occurred_from {
            query = query.filter(stock_movements::Column::OccurredAt.gte(from));
        }
        if let Some(to) = filter.occurred_to {
            query = query.filter(stock_movements::Column::OccurredAt.lt(to));
        }

        let total = query.clone().count(&self.db).await?;

        let movements = query
            .order_by_desc(stock_movements::Column::OccurredAt)
            .order_by_desc(stock_movements::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            movements,
            page.page,
            page.per_page,
            total,
        ))
    }

    /// Finds movements carrying the given reference, oldest first.
    ///
    /// Callers wanting retry safety put an idempotency key in
    /// `reference` and check here before re-posting.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_reference(
        &self,
        hotel_id: HotelId,
        reference: &str,
    ) -> Result<Vec<stock_movements::Model>, MovementRepoError> {
        let movements = stock_movements::Entity::find()
            .filter(stock_movements::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stock_movements::Column::Reference.eq(reference))
            .order_by_asc(stock_movements::Column::OccurredAt)
            .order_by_asc(stock_movements::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(movements)
    }

    /// Opening balance and per-type period sums for one item.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored movement type
    /// cannot be parsed.
    pub async fn period_sums(
        &self,
        hotel_id: HotelId,
        item_id: ItemId,
        period: &StockPeriod,
    ) -> Result<(Decimal, MovementSums), MovementRepoError> {
        let basis = ledger_basis_for_period(&self.db, hotel_id, period).await?;
        Ok(basis.get(&item_id).copied().unwrap_or_default())
    }
}

/// Opening balances and per-type period sums for every item in the
/// hotel, from one ledger scan.
///
/// Movements strictly before the period start accumulate into the
/// opening balance; movements within `[start, end)` accumulate into the
/// per-type sums; movements at or after the period end are ignored.
pub(crate) async fn ledger_basis_for_period<C: ConnectionTrait>(
    conn: &C,
    hotel_id: HotelId,
    period: &StockPeriod,
) -> Result<HashMap<ItemId, (Decimal, MovementSums)>, MovementRepoError> {
    let rows = stock_movements::Entity::find()
        .filter(stock_movements::Column::HotelId.eq(hotel_id.into_inner()))
        .filter(stock_movements::Column::OccurredAt.lt(period.end))
        .all(conn)
        .await?;

    let mut basis: HashMap<ItemId, (Decimal, MovementSums)> = HashMap::new();
    for row in rows {
        let movement_type: MovementType = row.movement_type.parse()?;
        let occurred_at = row.occurred_at.with_timezone(&Utc);
        let (opening, sums) = basis.entry(ItemId::from_uuid(row.item_id)).or_default();
        if period.is_before(occurred_at) {
            *opening += row.quantity;
        } else {
            sums.accumulate(movement_type, row.quantity);
        }
    }

    Ok(basis)
}

/// Posts a signed reconciliation adjustment inside the caller's
/// transaction. Reserved for stocktake approval; bypasses the active
/// filter so retired items still reconcile.
pub(crate) async fn record_adjustment(
    txn: &DatabaseTransaction,
    hotel_id: HotelId,
    item_id: ItemId,
    delta: Decimal,
    valuation_cost: Decimal,
    stocktake_id: StocktakeId,
    recorded_by: StaffId,
) -> Result<stock_movements::Model, MovementRepoError> {
    validate_adjustment_delta(delta)?;

    let now: DateTime<Utc> = Utc::now();
    let movement = stock_movements::ActiveModel {
        id: Set(MovementId::new().into_inner()),
        hotel_id: Set(hotel_id.into_inner()),
        item_id: Set(item_id.into_inner()),
        movement_type: Set(MovementType::Adjustment.as_str().to_string()),
        quantity: Set(delta),
        unit_cost: Set(Some(valuation_cost)),
        reference: Set(Some(stocktake_id.to_string())),
        notes: Set(None),
        occurred_at: Set(now.into()),
        recorded_by: Set(recorded_by.into_inner()),
        created_at: Set(now.into()),
    }
    .insert(txn)
    .await?;

    increment_current_qty(txn, item_id, delta).await?;

    Ok(movement)
}

/// Inserts the movement row with its signed contribution.
async fn insert_movement(
    txn: &DatabaseTransaction,
    input: &NewMovement,
    signed_quantity: Decimal,
) -> Result<stock_movements::Model, MovementRepoError> {
    let now = Utc::now();
    let occurred_at = input.occurred_at.unwrap_or(now);

    let movement = stock_movements::ActiveModel {
        id: Set(MovementId::new().into_inner()),
        hotel_id: Set(input.hotel_id.into_inner()),
        item_id: Set(input.item_id.into_inner()),
        movement_type: Set(input.movement_type.as_str().to_string()),
        quantity: Set(signed_quantity),
        unit_cost: Set(input.unit_cost),
        reference: Set(input.reference.clone()),
        notes: Set(input.notes.clone()),
        occurred_at: Set(occurred_at.into()),
        recorded_by: Set(input.recorded_by.into_inner()),
        created_at: Set(now.into()),
    }
    .insert(txn)
    .await?;

    Ok(movement)
}

/// Atomically increments the item's running quantity by a signed delta.
///
/// The increment happens in SQL, never read-modify-write, so concurrent
/// movements against one item serialize without lost updates.
pub(crate) async fn increment_current_qty(
    txn: &DatabaseTransaction,
    item_id: ItemId,
    delta: Decimal,
) -> Result<(), MovementRepoError> {
    use sea_orm::sea_query::{Expr, ExprTrait};

    let result = stock_items::Entity::update_many()
        .col_expr(
            stock_items::Column::CurrentQty,
            Expr::col(stock_items::Column::CurrentQty).add(delta),
        )
        .col_expr(
            stock_items::Column::UpdatedAt,
            Expr::value(Utc::now()),
        )
        .filter(stock_items::Column::Id.eq(item_id.into_inner()))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(MovementRepoError::ItemNotFound(item_id));
    }
    Ok(())
}

/// Reads the item's running quantity inside the transaction.
async fn read_current_qty(
    txn: &DatabaseTransaction,
    item_id: ItemId,
) -> Result<Decimal, MovementRepoError> {
    let item = stock_items::Entity::find_by_id(item_id.into_inner())
        .one(txn)
        .await?
        .ok_or(MovementRepoError::ItemNotFound(item_id))?;

    Ok(item.current_qty)
}
