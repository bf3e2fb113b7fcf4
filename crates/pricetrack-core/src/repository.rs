//! Read-side repository consumed by reports
//!
//! Reports never talk to SQLite directly. They take a [`PriceRepository`],
//! pull one [`Snapshot`], and hand its slices to the analytics engine.

use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::Result;
use crate::models::{PriceRecord, Product};

/// Source of the two collections the analytics engine works on
pub trait PriceRepository {
    fn products(&self) -> Result<Vec<Product>>;

    fn price_records(&self) -> Result<Vec<PriceRecord>>;

    /// Load both collections together
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            products: self.products()?,
            records: self.price_records()?,
        })
    }
}

/// Products and price records as of one read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub records: Vec<PriceRecord>,
}

impl Snapshot {
    pub fn new(products: Vec<Product>, records: Vec<PriceRecord>) -> Self {
        Self { products, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PriceRepository for Database {
    fn products(&self) -> Result<Vec<Product>> {
        self.list_products()
    }

    fn price_records(&self) -> Result<Vec<PriceRecord>> {
        self.list_price_records()
    }
}

impl PriceRepository for Snapshot {
    fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn price_records(&self) -> Result<Vec<PriceRecord>> {
        Ok(self.records.clone())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.clone())
    }
}
