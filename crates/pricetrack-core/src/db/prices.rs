//! Price record operations

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{datetime_column, format_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewPriceRecord, PriceRecord};

const RECORD_COLUMNS: &str = "id, product_id, recorded_at, price";

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PriceRecord> {
    Ok(PriceRecord {
        id: row.get(0)?,
        product_id: row.get(1)?,
        recorded_at: datetime_column(row, 2)?,
        price: row.get(3)?,
    })
}

impl Database {
    /// Log an observed price, returning the record id
    ///
    /// Rejects non-positive prices and unknown products.
    pub fn log_price(&self, record: &NewPriceRecord) -> Result<i64> {
        record.validate()?;
        if self.get_product(record.product_id)?.is_none() {
            return Err(Error::NotFound(format!("Product {}", record.product_id)));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO price_records (product_id, recorded_at, price) VALUES (?1, ?2, ?3)",
            params![
                record.product_id,
                format_datetime(record.recorded_at),
                record.price
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, product_id = record.product_id, price = record.price, "Logged price");
        Ok(id)
    }

    /// Get a price record by id
    pub fn get_price_record(&self, id: i64) -> Result<Option<PriceRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!("SELECT {} FROM price_records WHERE id = ?1", RECORD_COLUMNS),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// All price records, oldest first
    pub fn list_price_records(&self) -> Result<Vec<PriceRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM price_records ORDER BY recorded_at, id",
            RECORD_COLUMNS
        ))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Price history for one product, oldest first
    pub fn list_price_records_for_product(&self, product_id: i64) -> Result<Vec<PriceRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM price_records WHERE product_id = ?1 ORDER BY recorded_at, id",
            RECORD_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![product_id], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Most recent price record for a product
    pub fn latest_price_record(&self, product_id: i64) -> Result<Option<PriceRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM price_records WHERE product_id = ?1 ORDER BY recorded_at DESC, id DESC LIMIT 1",
                    RECORD_COLUMNS
                ),
                params![product_id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Delete a price record; returns false if it did not exist
    pub fn delete_price_record(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM price_records WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
