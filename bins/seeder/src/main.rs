//! Database seeder for BarTally development and testing.
//!
//! Seeds a demo hotel's beverage catalog, an opening ledger, and a
//! populated draft stocktake for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use bartally_core::catalog::{BaseUnit, NewCategory, NewItem, UomStrategy};
use bartally_core::ledger::{MovementType, NewMovement};
use bartally_core::stocktake::{NewStocktake, StockPeriod};
use bartally_db::entities::{stock_categories, stock_items, stocktakes};
use bartally_db::repositories::{CatalogRepository, MovementRepository, StocktakeRepository};
use bartally_shared::config::{AppConfig, LogConfig, LogFormat};
use bartally_shared::types::{CategoryId, HotelId, ItemId, StaffId, StocktakeId};

/// Demo hotel ID (consistent for all seeds)
const DEMO_HOTEL_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo staff ID (consistent for all seeds)
const DEMO_STAFF_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Reference on the seeded opening purchases; doubles as the marker
/// that the ledger is already seeded.
const OPENING_REFERENCE: &str = "SEED-PO-1001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.log);

    println!("Connecting to database...");
    let db = bartally_db::connect_with(&config.database).await?;
    info!("Connected to database");

    println!("Seeding categories...");
    seed_categories(&db).await;

    println!("Seeding stock items...");
    seed_items(&db).await;

    println!("Seeding ledger movements...");
    seed_ledger(&db).await;

    println!("Seeding draft stocktake...");
    seed_stocktake(&db).await;

    println!("Seeding complete!");
    Ok(())
}

/// Installs the tracing subscriber per the log config.
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

fn demo_hotel_id() -> HotelId {
    HotelId::from_uuid(Uuid::parse_str(DEMO_HOTEL_ID).unwrap())
}

fn demo_staff_id() -> StaffId {
    StaffId::from_uuid(Uuid::parse_str(DEMO_STAFF_ID).unwrap())
}

/// Seeds the beverage categories.
async fn seed_categories(db: &DatabaseConnection) {
    let catalog = CatalogRepository::new(db.clone());
    let hotel_id = demo_hotel_id();

    let categories = [
        ("Wine", 1),
        ("Draft Beer", 2),
        ("Spirits", 3),
        ("Soft Drinks", 4),
    ];

    for (name, sort_order) in categories {
        let existing = stock_categories::Entity::find()
            .filter(stock_categories::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stock_categories::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            println!("  Category {name} already exists, skipping...");
            continue;
        }

        let input = NewCategory {
            hotel_id,
            name: name.to_string(),
            sort_order,
        };
        if let Err(e) = catalog.create_category(input).await {
            eprintln!("Failed to insert category {name}: {e}");
        } else {
            println!("  Created category: {name}");
        }
    }
}

/// Seeds the stock items.
///
/// Costs are per purchase unit; the cased wine counts open cases as a
/// fraction while the keg and the can case count loose subunits.
async fn seed_items(db: &DatabaseConnection) {
    let catalog = CatalogRepository::new(db.clone());
    let hotel_id = demo_hotel_id();

    let items = [
        (
            "WINE-001",
            "House Red 750ml",
            "Wine",
            "12",
            UomStrategy::FractionalRemainder,
            BaseUnit::Piece,
            "96.00",
        ),
        (
            "WINE-002",
            "House White 750ml",
            "Wine",
            "12",
            UomStrategy::FractionalRemainder,
            BaseUnit::Piece,
            "90.00",
        ),
        (
            "BEER-001",
            "Lager Keg (88 pints)",
            "Draft Beer",
            "88",
            UomStrategy::AbsoluteSubunitCount,
            BaseUnit::Piece,
            "264.00",
        ),
        (
            "SPIRIT-001",
            "London Dry Gin 700ml",
            "Spirits",
            "700",
            UomStrategy::FractionalRemainder,
            BaseUnit::Ml,
            "21.00",
        ),
        (
            "SOFT-001",
            "Cola 330ml Can",
            "Soft Drinks",
            "24",
            UomStrategy::AbsoluteSubunitCount,
            BaseUnit::Piece,
            "14.40",
        ),
    ];

    for (sku, name, category_name, uom, uom_strategy, base_unit, unit_cost) in items {
        let existing = stock_items::Entity::find()
            .filter(stock_items::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stock_items::Column::Sku.eq(sku))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            println!("  Item {sku} already exists, skipping...");
            continue;
        }

        let category_id = stock_categories::Entity::find()
            .filter(stock_categories::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stock_categories::Column::Name.eq(category_name))
            .one(db)
            .await
            .ok()
            .flatten()
            .map(|category| CategoryId::from_uuid(category.id));

        let input = NewItem {
            hotel_id,
            category_id,
            sku: sku.to_string(),
            name: name.to_string(),
            uom: Decimal::from_str(uom).unwrap(),
            uom_strategy,
            base_unit,
            unit_cost: Decimal::from_str(unit_cost).unwrap(),
        };
        if let Err(e) = catalog.create_item(input).await {
            eprintln!("Failed to insert item {sku}: {e}");
        } else {
            println!("  Created item: {sku} ({name})");
        }
    }
}

/// Seeds opening purchases before the stocktake window and trading
/// movements inside it.
async fn seed_ledger(db: &DatabaseConnection) {
    let movements = MovementRepository::new(db.clone());
    let hotel_id = demo_hotel_id();
    let staff_id = demo_staff_id();

    let already_seeded = movements
        .find_by_reference(hotel_id, OPENING_REFERENCE)
        .await
        .is_ok_and(|found| !found.is_empty());
    if already_seeded {
        println!("  Ledger already seeded, skipping...");
        return;
    }

    // (sku, type, quantity in base units, days ago, reference)
    let entries = [
        ("WINE-001", MovementType::Purchase, dec!(144), 10, Some(OPENING_REFERENCE)),
        ("WINE-002", MovementType::Purchase, dec!(72), 10, Some(OPENING_REFERENCE)),
        ("BEER-001", MovementType::Purchase, dec!(176), 10, Some(OPENING_REFERENCE)),
        ("SPIRIT-001", MovementType::Purchase, dec!(4200), 10, Some(OPENING_REFERENCE)),
        ("SOFT-001", MovementType::Purchase, dec!(240), 10, Some(OPENING_REFERENCE)),
        ("WINE-001", MovementType::Sale, dec!(30), 3, None),
        ("WINE-001", MovementType::Waste, dec!(2), 2, None),
        ("WINE-002", MovementType::Sale, dec!(18), 4, None),
        ("BEER-001", MovementType::Sale, dec!(95), 3, None),
        ("SPIRIT-001", MovementType::Sale, dec!(1750), 5, None),
        ("SOFT-001", MovementType::Sale, dec!(75), 1, None),
        ("SOFT-001", MovementType::TransferOut, dec!(24), 2, None),
    ];

    let mut recorded = 0;
    for (sku, movement_type, quantity, days_ago, reference) in entries {
        let Some(item) = stock_items::Entity::find()
            .filter(stock_items::Column::HotelId.eq(hotel_id.into_inner()))
            .filter(stock_items::Column::Sku.eq(sku))
            .one(db)
            .await
            .ok()
            .flatten()
        else {
            eprintln!("Item {sku} missing; skipping its movements");
            continue;
        };

        let input = NewMovement {
            hotel_id,
            item_id: ItemId::from_uuid(item.id),
            movement_type,
            quantity,
            unit_cost: None,
            reference: reference.map(str::to_string),
            notes: None,
            occurred_at: Some(Utc::now() - Duration::days(days_ago)),
            recorded_by: staff_id,
        };
        if let Err(e) = movements.record(input).await {
            eprintln!("Failed to record {movement_type} for {sku}: {e}");
        } else {
            recorded += 1;
        }
    }

    println!("  Recorded {recorded} ledger movements");
}

/// Seeds a populated DRAFT stocktake over the last seven days.
async fn seed_stocktake(db: &DatabaseConnection) {
    let stocktakes_repo = StocktakeRepository::new(db.clone());
    let hotel_id = demo_hotel_id();
    let staff_id = demo_staff_id();

    let existing = stocktakes::Entity::find()
        .filter(stocktakes::Column::HotelId.eq(hotel_id.into_inner()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  A stocktake already exists, skipping...");
        return;
    }

    let end = Utc::now();
    let start = end - Duration::days(7);
    let period = StockPeriod::new(start, end).expect("seed period is valid");

    let input = NewStocktake {
        hotel_id,
        period,
        notes: Some("Weekly cellar count (seeded)".to_string()),
    };
    let stocktake = match stocktakes_repo.create(input, staff_id).await {
        Ok(stocktake) => stocktake,
        Err(e) => {
            eprintln!("Failed to create stocktake: {e}");
            return;
        }
    };

    match stocktakes_repo
        .populate(hotel_id, StocktakeId::from_uuid(stocktake.id))
        .await
    {
        Ok(populated) => println!(
            "  Created draft stocktake with {} lines",
            populated.lines.len()
        ),
        Err(e) => eprintln!("Failed to populate stocktake: {e}"),
    }
}
