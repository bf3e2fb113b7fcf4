//! Product operations

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{datetime_column, Database};
use crate::error::{Error, Result};
use crate::models::{
    name_key, normalize_category, validate_name, NewProduct, Product, ProductUpdate,
};

const PRODUCT_COLUMNS: &str = "id, name, category, unit, image, created_at";

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        unit: row.get(3)?,
        image: row.get(4)?,
        created_at: datetime_column(row, 5)?,
    })
}

impl Database {
    /// Create a product, returning its id
    ///
    /// The name is trimmed and must not be empty; a blank category becomes
    /// "General".
    pub fn create_product(&self, product: &NewProduct) -> Result<i64> {
        let name = product.validated_name()?;
        let category = product.normalized_category();
        let unit = product.unit.as_deref().map(str::trim).unwrap_or("");

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO products (name, category, unit, image) VALUES (?1, ?2, ?3, ?4)",
            params![name, category, unit, product.image],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, name = %name, category = %category, "Created product");
        Ok(id)
    }

    /// Get a product by id
    pub fn get_product(&self, id: i64) -> Result<Option<Product>> {
        let conn = self.conn()?;
        let product = conn
            .query_row(
                &format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS),
                params![id],
                row_to_product,
            )
            .optional()?;
        Ok(product)
    }

    /// Find a product by name (case-insensitive, surrounding whitespace ignored)
    ///
    /// Case folding is Unicode-aware, so "ÉCLAIR" finds "Éclair". Among
    /// several matches the lowest id wins.
    pub fn find_product_by_name(&self, name: &str) -> Result<Option<Product>> {
        let key = name_key(name);
        let id = {
            let conn = self.conn()?;
            let mut stmt = conn.prepare("SELECT id, name FROM products ORDER BY id")?;
            let mut rows = stmt.query([])?;
            let mut found = None;
            while let Some(row) = rows.next()? {
                let candidate: String = row.get(1)?;
                if name_key(&candidate) == key {
                    found = Some(row.get::<_, i64>(0)?);
                    break;
                }
            }
            found
        };

        match id {
            Some(id) => self.get_product(id),
            None => Ok(None),
        }
    }

    /// Resolve a product reference given as an id or a name
    pub fn resolve_product(&self, name_or_id: &str) -> Result<Option<Product>> {
        if let Ok(id) = name_or_id.trim().parse::<i64>() {
            if let Some(product) = self.get_product(id)? {
                return Ok(Some(product));
            }
        }
        self.find_product_by_name(name_or_id)
    }

    /// List all products alphabetically
    pub fn list_products(&self) -> Result<Vec<Product>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM products ORDER BY name COLLATE NOCASE, id",
            PRODUCT_COLUMNS
        ))?;
        let products = stmt
            .query_map([], row_to_product)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Apply a partial update; returns the updated product
    pub fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product> {
        let existing = self
            .get_product(id)?
            .ok_or_else(|| Error::NotFound(format!("Product {}", id)))?;

        let name = match &update.name {
            Some(name) => validate_name(name)?,
            None => existing.name,
        };
        let category = match &update.category {
            Some(category) => normalize_category(Some(category)),
            None => existing.category,
        };
        let unit = match &update.unit {
            Some(unit) => unit.trim().to_string(),
            None => existing.unit,
        };

        let conn = self.conn()?;
        conn.execute(
            "UPDATE products SET name = ?1, category = ?2, unit = ?3 WHERE id = ?4",
            params![name, category, unit, id],
        )?;

        self.get_product(id)?
            .ok_or_else(|| Error::NotFound(format!("Product {}", id)))
    }

    /// Replace (or clear) a product's image
    pub fn set_product_image(&self, id: i64, image: Option<&[u8]>) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE products SET image = ?1 WHERE id = ?2",
            params![image, id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Product {}", id)));
        }
        Ok(())
    }

    /// Delete a product and, by cascade, its price records
    ///
    /// Returns false if no such product exists.
    pub fn delete_product(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
