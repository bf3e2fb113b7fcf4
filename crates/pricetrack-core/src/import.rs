//! CSV import of price history
//!
//! Expected header (column order does not matter, names are case-insensitive):
//!
//! ```text
//! product,category,unit,date,price
//! ```
//!
//! `category` and `unit` are optional columns. Products are matched by name
//! (case-insensitive, Unicode-aware) and created on first sight.

use std::collections::HashMap;
use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::{format_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{name_key, normalize_category, validate_name, validate_price};

/// One parsed CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub product: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub price: f64,
}

/// Counts from an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub products_created: usize,
    pub records_imported: usize,
}

/// Parse a record date
///
/// Accepts `YYYY-MM-DD` (taken as midday UTC), `YYYY-MM-DD HH:MM:SS` (UTC)
/// and RFC 3339.
pub fn parse_record_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(12, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn non_empty(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse price history CSV
///
/// Any invalid row aborts the whole parse with an error naming its line.
pub fn parse_prices_csv<R: Read>(reader: R) -> Result<Vec<PriceRow>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let product_col = column(&headers, "product")
        .ok_or_else(|| Error::Import("Missing 'product' column".to_string()))?;
    let date_col = column(&headers, "date")
        .ok_or_else(|| Error::Import("Missing 'date' column".to_string()))?;
    let price_col = column(&headers, "price")
        .ok_or_else(|| Error::Import("Missing 'price' column".to_string()))?;
    let category_col = column(&headers, "category");
    let unit_col = column(&headers, "unit");

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let product = validate_name(record.get(product_col).unwrap_or(""))
            .map_err(|_| Error::Import(format!("Line {}: missing product name", line)))?;

        let raw_date = record.get(date_col).unwrap_or("");
        let recorded_at = parse_record_date(raw_date)
            .ok_or_else(|| Error::Import(format!("Line {}: invalid date '{}'", line, raw_date)))?;

        let raw_price = record.get(price_col).unwrap_or("");
        let price: f64 = raw_price
            .trim_start_matches('$')
            .parse()
            .map_err(|_| Error::Import(format!("Line {}: invalid price '{}'", line, raw_price)))?;
        validate_price(price).map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        rows.push(PriceRow {
            product,
            category: non_empty(&record, category_col),
            unit: non_empty(&record, unit_col),
            recorded_at,
            price,
        });
    }

    debug!(rows = rows.len(), "Parsed price CSV");
    Ok(rows)
}

impl Database {
    /// Store parsed rows in one transaction, creating products as needed
    pub fn import_price_rows(&self, rows: &[PriceRow]) -> Result<ImportStats> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut stats = ImportStats::default();

        // Existing products by folded name; the lowest id wins on duplicates
        let mut product_ids: HashMap<String, i64> = HashMap::new();
        {
            let mut stmt = tx.prepare("SELECT id, name FROM products ORDER BY id")?;
            let existing =
                stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?;
            for product in existing {
                let (id, name) = product?;
                product_ids.entry(name_key(&name)).or_insert(id);
            }
        }

        for row in rows {
            let key = name_key(&row.product);
            let product_id = match product_ids.get(&key) {
                Some(id) => *id,
                None => {
                    tx.execute(
                        "INSERT INTO products (name, category, unit) VALUES (?1, ?2, ?3)",
                        params![
                            row.product,
                            normalize_category(row.category.as_deref()),
                            row.unit.as_deref().unwrap_or("")
                        ],
                    )?;
                    stats.products_created += 1;
                    let id = tx.last_insert_rowid();
                    product_ids.insert(key, id);
                    id
                }
            };

            tx.execute(
                "INSERT INTO price_records (product_id, recorded_at, price) VALUES (?1, ?2, ?3)",
                params![product_id, format_datetime(row.recorded_at), row.price],
            )?;
            stats.records_imported += 1;
        }

        tx.commit()?;
        info!(
            products_created = stats.products_created,
            records_imported = stats.records_imported,
            "Imported price history"
        );
        Ok(stats)
    }

    /// Parse and store a price history CSV
    pub fn import_prices_csv<R: Read>(&self, reader: R) -> Result<ImportStats> {
        let rows = parse_prices_csv(reader)?;
        self.import_price_rows(&rows)
    }
}
