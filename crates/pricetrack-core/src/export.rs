//! Export functionality for price history and full database backups
//!
//! Supports:
//! - Price history CSV export (same shape the CSV importer reads)
//! - Full JSON backup export/import with ids preserved

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{format_datetime, Database};
use crate::error::{Error, Result};
use crate::import::ImportStats;
use crate::models::{validate_name, validate_price, PriceRecord, Product};

/// Product entry for backup (image as base64)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductExport {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductExport {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            category: p.category.clone(),
            unit: p.unit.clone(),
            image: p.image.as_ref().map(|bytes| STANDARD.encode(bytes)),
            created_at: p.created_at,
        }
    }
}

/// Backup metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Version of pricetrack that wrote the backup
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub total_records: usize,
}

/// Full database backup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullBackup {
    pub metadata: BackupMetadata,
    pub products: Vec<ProductExport>,
    pub price_records: Vec<PriceRecord>,
}

impl Database {
    /// Export price history as CSV (`product,category,unit,date,price`)
    pub fn export_prices_csv(&self) -> Result<String> {
        let products: HashMap<i64, Product> = self
            .list_products()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["product", "category", "unit", "date", "price"])?;

        for record in self.list_price_records()? {
            let Some(product) = products.get(&record.product_id) else {
                continue;
            };
            // Full timestamp and shortest exact price round-trip through import
            let date = format_datetime(record.recorded_at);
            let price = record.price.to_string();
            writer.write_record([
                product.name.as_str(),
                product.category.as_str(),
                product.unit.as_str(),
                date.as_str(),
                price.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
    }

    /// Export every product and price record
    pub fn export_full_backup(&self) -> Result<FullBackup> {
        let products: Vec<ProductExport> =
            self.list_products()?.iter().map(ProductExport::from).collect();
        let price_records = self.list_price_records()?;

        Ok(FullBackup {
            metadata: BackupMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: Utc::now(),
                total_records: products.len() + price_records.len(),
            },
            products,
            price_records,
        })
    }

    /// Restore a backup, keeping its ids
    ///
    /// Everything is validated before anything is written. With
    /// `clear_existing`, current data is removed first; otherwise id
    /// collisions fail the import and nothing is written.
    pub fn import_full_backup(&self, backup: &FullBackup, clear_existing: bool) -> Result<ImportStats> {
        let mut images = Vec::with_capacity(backup.products.len());
        for product in &backup.products {
            validate_name(&product.name)?;
            let image = product
                .image
                .as_deref()
                .map(|encoded| STANDARD.decode(encoded))
                .transpose()
                .map_err(|e| {
                    Error::InvalidData(format!("Product {} image is not base64: {}", product.id, e))
                })?;
            images.push(image);
        }
        for record in &backup.price_records {
            validate_price(record.price)?;
            if !backup.products.iter().any(|p| p.id == record.product_id) {
                return Err(Error::InvalidData(format!(
                    "Price record {} references missing product {}",
                    record.id, record.product_id
                )));
            }
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if clear_existing {
            tx.execute_batch(
                r#"
                DELETE FROM price_records;
                DELETE FROM products;
                "#,
            )?;
        }

        let mut stats = ImportStats::default();
        for (product, image) in backup.products.iter().zip(images) {
            tx.execute(
                "INSERT INTO products (id, name, category, unit, image, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    product.id,
                    product.name,
                    product.category,
                    product.unit,
                    image,
                    format_datetime(product.created_at)
                ],
            )?;
            stats.products_created += 1;
        }

        for record in &backup.price_records {
            tx.execute(
                "INSERT INTO price_records (id, product_id, recorded_at, price) VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    record.product_id,
                    format_datetime(record.recorded_at),
                    record.price
                ],
            )?;
            stats.records_imported += 1;
        }

        tx.commit()?;
        info!(
            products = stats.products_created,
            records = stats.records_imported,
            "Restored full backup"
        );
        Ok(stats)
    }
}
