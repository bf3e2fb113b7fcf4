//! Test utilities: a fixed clock and product/record builders
//!
//! Engine functions take `now` explicitly, so tests pin it to
//! [`fixed_now`] instead of reading the wall clock.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::analytics::calendar::add_months;
use crate::db::Database;
use crate::models::{NewPriceRecord, NewProduct, PriceRecord, Product};

/// 2026-03-15 12:00:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Midday UTC on the given date
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub fn months_ago(now: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    add_months(now, -months)
}

/// In-memory product with no unit or image
pub fn product(id: i64, name: &str, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: category.to_string(),
        unit: String::new(),
        image: None,
        created_at: at(2020, 1, 1),
    }
}

pub fn record(id: i64, product_id: i64, price: f64, recorded_at: DateTime<Utc>) -> PriceRecord {
    PriceRecord {
        id,
        product_id,
        recorded_at,
        price,
    }
}

/// Fresh database seeded with a small grocery basket
///
/// Milk and Bread have a year of monthly prices ending at [`fixed_now`];
/// Coffee was first logged ten days before it.
/// Returns the database and the product ids in that order.
pub fn seeded_database() -> (Database, [i64; 3]) {
    let db = Database::in_memory().expect("in-memory database");
    let now = fixed_now();

    let milk = db
        .create_product(&NewProduct::new("Milk").with_category("Dairy").with_unit("l"))
        .expect("create milk");
    let bread = db
        .create_product(&NewProduct::new("Bread").with_category("Bakery").with_unit("loaf"))
        .expect("create bread");
    let coffee = db
        .create_product(&NewProduct::new("Coffee").with_category("Drinks").with_unit("kg"))
        .expect("create coffee");

    for months in (0..=12).rev() {
        let when = months_ago(now, months) - Duration::days(1);
        let step = f64::from(12 - months);
        db.log_price(&NewPriceRecord::new(milk, 1.00 + 0.02 * step, when))
            .expect("log milk");
        db.log_price(&NewPriceRecord::new(bread, 2.50 + 0.05 * step, when))
            .expect("log bread");
    }
    db.log_price(&NewPriceRecord::new(coffee, 12.00, days_ago(now, 10)))
        .expect("log coffee");

    (db, [milk, bread, coffee])
}
