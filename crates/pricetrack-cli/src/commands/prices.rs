//! Price logging command implementations

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use pricetrack_core::{parse_record_date, Database, NewPriceRecord, Product, Settings};

use super::truncate;

fn resolve(db: &Database, product: &str) -> Result<Product> {
    db.resolve_product(product)?
        .with_context(|| format!("Product '{}' not found", product))
}

/// Log a price, returning the record id
pub fn cmd_prices_log(
    db: &Database,
    product: &str,
    price: f64,
    date: Option<&str>,
    settings: &Settings,
) -> Result<i64> {
    let product = resolve(db, product)?;
    let recorded_at = match date {
        Some(s) => parse_record_date(s)
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s))?,
        None => Utc::now(),
    };

    let id = db.log_price(&NewPriceRecord::new(product.id, price, recorded_at))?;
    println!(
        "✅ Logged {} for {} on {}",
        settings.money(price),
        product.name,
        recorded_at.format("%Y-%m-%d")
    );
    Ok(id)
}

/// Show the most recent `limit` prices, newest first
pub fn cmd_prices_list(
    db: &Database,
    product: Option<&str>,
    limit: usize,
    settings: &Settings,
) -> Result<()> {
    let records = match product {
        Some(p) => {
            let product = resolve(db, p)?;
            db.list_price_records_for_product(product.id)?
        }
        None => db.list_price_records()?,
    };

    if records.is_empty() {
        println!("No prices logged yet. Log one with:");
        println!("  pricetrack prices log Milk 1.29");
        return Ok(());
    }

    let names: HashMap<i64, String> = db
        .list_products()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    println!();
    println!("🧾 Prices ({} of {})", records.len().min(limit), records.len());
    println!("   {:>5}  {:<10}  {:<28} {:>10}", "ID", "Date", "Product", "Price");
    println!("   ─────────────────────────────────────────────────────────────");

    for record in records.iter().rev().take(limit) {
        let name = names.get(&record.product_id).map(String::as_str).unwrap_or("?");
        println!(
            "   {:>5}  {:<10}  {:<28} {:>10}",
            record.id,
            record.recorded_at.format("%Y-%m-%d"),
            truncate(name, 28),
            settings.money(record.price)
        );
    }
    println!();

    Ok(())
}

pub fn cmd_prices_delete(db: &Database, id: i64) -> Result<()> {
    if !db.delete_price_record(id)? {
        anyhow::bail!("Price record {} not found", id);
    }
    println!("🗑️  Deleted price record #{}", id);
    Ok(())
}
