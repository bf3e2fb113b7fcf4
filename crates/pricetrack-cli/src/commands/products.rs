//! Product command implementations

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pricetrack_core::{Database, NewProduct, ProductUpdate, Settings};

use super::truncate;

pub fn cmd_products_list(db: &Database, settings: &Settings) -> Result<()> {
    let products = db.list_products()?;

    if products.is_empty() {
        println!("No products yet. Add one with:");
        println!("  pricetrack products add Milk --category Dairy --unit l");
        return Ok(());
    }

    println!();
    println!("🛒 Products");
    println!(
        "   {:>4}  {:<28} {:<16} {:<6} {:>10}",
        "ID", "Name", "Category", "Unit", "Latest"
    );
    println!("   ─────────────────────────────────────────────────────────────────────");

    for product in &products {
        let latest = db
            .latest_price_record(product.id)?
            .map(|r| settings.money(r.price))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:>4}  {:<28} {:<16} {:<6} {:>10}",
            product.id,
            truncate(&product.name, 28),
            truncate(product.category_label(), 16),
            truncate(&product.unit, 6),
            latest
        );
    }
    println!();

    Ok(())
}

/// Add a product, returning its id
pub fn cmd_products_add(
    db: &Database,
    name: &str,
    category: Option<&str>,
    unit: Option<&str>,
    image: Option<&Path>,
) -> Result<i64> {
    let mut product = NewProduct::new(name);
    if let Some(category) = category {
        product = product.with_category(category);
    }
    if let Some(unit) = unit {
        product = product.with_unit(unit);
    }
    if let Some(path) = image {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        product = product.with_image(bytes);
    }

    let id = db.create_product(&product)?;
    println!("✅ Added product #{}: {}", id, product.validated_name()?);
    Ok(id)
}

pub fn cmd_products_update(
    db: &Database,
    id: i64,
    name: Option<String>,
    category: Option<String>,
    unit: Option<String>,
) -> Result<()> {
    let update = ProductUpdate {
        name,
        category,
        unit,
    };
    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass --name, --category or --unit.");
    }

    let product = db.update_product(id, &update)?;
    println!(
        "✅ Updated product #{}: {} ({}, {})",
        product.id,
        product.name,
        product.category_label(),
        if product.unit.is_empty() { "-" } else { product.unit.as_str() }
    );
    Ok(())
}

pub fn cmd_products_delete(db: &Database, id: i64) -> Result<()> {
    let product = db
        .get_product(id)?
        .with_context(|| format!("Product {} not found", id))?;
    let records = db.list_price_records_for_product(id)?.len();

    db.delete_product(id)?;
    println!(
        "🗑️  Deleted product #{} ({}) and {} price records",
        id, product.name, records
    );
    Ok(())
}
