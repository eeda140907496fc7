//! Concurrent access tests for the ledger and the approval engine.
//!
//! These tests verify that:
//! - Every movement lands in the ledger exactly once, and the
//!   denormalized `current_qty` equals the signed sum afterwards
//! - Racing approvers reconcile a stocktake exactly once
//! - Racing populate calls fill the lines exactly once

use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter,
};
use sea_orm_migration::MigratorTrait;
use tokio::sync::Barrier;

use bartally_core::catalog::{BaseUnit, NewItem, UomStrategy};
use bartally_core::ledger::{MovementType, NewMovement};
use bartally_core::stocktake::{NewStocktake, StockPeriod};
use bartally_db::entities::{stock_items, stock_movements};
use bartally_db::migration::Migrator;
use bartally_db::repositories::{CatalogRepository, MovementRepository, StocktakeRepository};
use bartally_shared::types::{HotelId, ItemId, StaffId, StocktakeId};
use bartally_shared::{DomainError, ErrorKind};

/// One pooled connection, because every connection to `sqlite::memory:`
/// gets its own empty database.
async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);
    let db = Database::connect(options).await.expect("sqlite connects");
    Migrator::up(&db, None).await.expect("migrations apply");
    db
}

async fn seed_item(db: &DatabaseConnection, hotel_id: HotelId, sku: &str) -> ItemId {
    let item = CatalogRepository::new(db.clone())
        .create_item(NewItem {
            hotel_id,
            category_id: None,
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            uom: dec!(12),
            uom_strategy: UomStrategy::AbsoluteSubunitCount,
            base_unit: BaseUnit::Piece,
            unit_cost: dec!(96),
        })
        .await
        .expect("item inserts");
    ItemId::from_uuid(item.id)
}

async fn current_qty(db: &DatabaseConnection, item_id: ItemId) -> Decimal {
    stock_items::Entity::find_by_id(item_id.into_inner())
        .one(db)
        .await
        .expect("query works")
        .expect("item exists")
        .current_qty
}

#[tokio::test]
async fn test_concurrent_recorders_never_drift_current_qty() {
    let db = test_db().await;
    let hotel_id = HotelId::new();
    let staff_id = StaffId::new();
    let item_id = seed_item(&db, hotel_id, "BEER-001").await;
    let movements = MovementRepository::new(db.clone());

    const NUM_RECORDERS: usize = 100;

    // A barrier so every recorder fires at the same instant.
    let barrier = Arc::new(Barrier::new(NUM_RECORDERS));
    let mut handles = Vec::with_capacity(NUM_RECORDERS);

    for i in 0..NUM_RECORDERS {
        let movements = movements.clone();
        let barrier = Arc::clone(&barrier);
        let (movement_type, quantity) = if i % 2 == 0 {
            (MovementType::Purchase, dec!(10))
        } else {
            (MovementType::Sale, dec!(2))
        };

        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            movements
                .record(NewMovement {
                    hotel_id,
                    item_id,
                    movement_type,
                    quantity,
                    unit_cost: None,
                    reference: None,
                    notes: None,
                    occurred_at: None,
                    recorded_by: staff_id,
                })
                .await
        }));
    }

    let results = join_all(handles).await;
    let mut expected_net = Decimal::ZERO;
    for result in results {
        let recorded = result
            .expect("recorder task completes")
            .expect("movement records");
        expected_net += recorded.movement.quantity;
    }
    // 50 purchases of 10 against 50 sales of 2.
    assert_eq!(expected_net, dec!(400));

    let stored = stock_movements::Entity::find()
        .filter(stock_movements::Column::ItemId.eq(item_id.into_inner()))
        .all(&db)
        .await
        .expect("query works");
    assert_eq!(stored.len(), NUM_RECORDERS);

    let ledger_sum: Decimal = stored.iter().map(|movement| movement.quantity).sum();
    assert_eq!(ledger_sum, expected_net);
    assert_eq!(
        current_qty(&db, item_id).await,
        ledger_sum,
        "current_qty drifted from the signed ledger sum"
    );
}

#[tokio::test]
async fn test_concurrent_approvers_reconcile_exactly_once() {
    let db = test_db().await;
    let hotel_id = HotelId::new();
    let staff_id = StaffId::new();
    let item_id = seed_item(&db, hotel_id, "WINE-001").await;
    let stocktakes = StocktakeRepository::new(db.clone());

    MovementRepository::new(db.clone())
        .record(NewMovement {
            hotel_id,
            item_id,
            movement_type: MovementType::Purchase,
            quantity: dec!(120),
            unit_cost: None,
            reference: None,
            notes: None,
            occurred_at: Some(Utc::now() - Duration::days(3)),
            recorded_by: staff_id,
        })
        .await
        .expect("movement records");

    let now = Utc::now();
    let period =
        StockPeriod::new(now - Duration::days(7), now - Duration::hours(1)).expect("period is valid");
    let stocktake = stocktakes
        .create(
            NewStocktake {
                hotel_id,
                period,
                notes: None,
            },
            staff_id,
        )
        .await
        .expect("stocktake creates");
    let stocktake_id = StocktakeId::from_uuid(stocktake.id);
    stocktakes
        .populate(hotel_id, stocktake_id)
        .await
        .expect("populate works");

    const NUM_APPROVERS: usize = 4;
    let approvers: Vec<StaffId> = (0..NUM_APPROVERS).map(|_| StaffId::new()).collect();

    let barrier = Arc::new(Barrier::new(NUM_APPROVERS));
    let mut handles = Vec::with_capacity(NUM_APPROVERS);
    for approver in &approvers {
        let stocktakes = stocktakes.clone();
        let barrier = Arc::clone(&barrier);
        let approver = *approver;
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            stocktakes.approve(hotel_id, stocktake_id, approver).await
        }));
    }

    let results = join_all(handles).await;
    let mut winners = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        match result.expect("approver task completes") {
            Ok(approved) => winners.push((i, approved)),
            Err(err) => {
                assert_eq!(err.error_code(), "STOCKTAKE_ALREADY_APPROVED");
                assert_eq!(err.kind(), ErrorKind::State);
            }
        }
    }
    assert_eq!(winners.len(), 1, "exactly one approver may win the race");

    let (winner, approved) = &winners[0];
    assert_eq!(approved.adjustments_posted, 1);
    assert_eq!(
        approved.stocktake.approved_by,
        Some(approvers[*winner].into_inner())
    );

    // The write-off happened exactly once: one adjustment for the full
    // uncounted expectation, never doubled by the losing approvers.
    let adjustment_count = stock_movements::Entity::find()
        .filter(stock_movements::Column::HotelId.eq(hotel_id.into_inner()))
        .filter(stock_movements::Column::MovementType.eq("ADJUSTMENT"))
        .count(&db)
        .await
        .expect("count works");
    assert_eq!(adjustment_count, 1);
    assert_eq!(current_qty(&db, item_id).await, Decimal::ZERO);
}

#[tokio::test]
async fn test_concurrent_populates_fill_lines_exactly_once() {
    let db = test_db().await;
    let hotel_id = HotelId::new();
    let staff_id = StaffId::new();
    seed_item(&db, hotel_id, "WINE-001").await;
    seed_item(&db, hotel_id, "BEER-001").await;
    let stocktakes = StocktakeRepository::new(db.clone());

    let now = Utc::now();
    let period =
        StockPeriod::new(now - Duration::days(7), now - Duration::hours(1)).expect("period is valid");
    let stocktake = stocktakes
        .create(
            NewStocktake {
                hotel_id,
                period,
                notes: None,
            },
            staff_id,
        )
        .await
        .expect("stocktake creates");
    let stocktake_id = StocktakeId::from_uuid(stocktake.id);

    const NUM_POPULATORS: usize = 8;
    let barrier = Arc::new(Barrier::new(NUM_POPULATORS));
    let mut handles = Vec::with_capacity(NUM_POPULATORS);
    for _ in 0..NUM_POPULATORS {
        let stocktakes = stocktakes.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            stocktakes.populate(hotel_id, stocktake_id).await
        }));
    }

    let results = join_all(handles).await;
    let mut successes = 0;
    for result in results {
        match result.expect("populate task completes") {
            Ok(populated) => {
                successes += 1;
                assert_eq!(populated.lines.len(), 2);
            }
            Err(err) => {
                assert_eq!(err.error_code(), "LINES_ALREADY_POPULATED");
                assert_eq!(err.kind(), ErrorKind::State);
            }
        }
    }
    assert_eq!(successes, 1, "exactly one populate may fill the lines");

    let lines = stocktakes
        .get(hotel_id, stocktake_id)
        .await
        .expect("get works")
        .lines;
    assert_eq!(lines.len(), 2, "lines must never duplicate");
}
