//! Pricetrack Core Library
//!
//! Shared functionality for the Pricetrack personal inflation tracker:
//! - Database access and migrations for products and price records
//! - CSV import and export of price history
//! - Full JSON backups
//! - Inflation analytics engine (basket cost, personal CPI, forecasts)
//! - Layered user settings

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod repository;

/// Test utilities: fixed clock, builders and a seeded database
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{InflationSummary, SummaryOptions};
pub use config::Settings;
pub use db::Database;
pub use error::{Error, Result};
pub use export::{BackupMetadata, FullBackup, ProductExport};
pub use import::{parse_prices_csv, parse_record_date, ImportStats, PriceRow};
pub use models::{
    NewPriceRecord, NewProduct, PriceRecord, Product, ProductUpdate, StoreStats, DEFAULT_CATEGORY,
};
pub use repository::{PriceRepository, Snapshot};
