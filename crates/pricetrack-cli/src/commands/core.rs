//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_settings` - Resolve settings from --config or the default location
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Database size, counts and date range
//! - `cmd_reset` - Delete all data

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pricetrack_core::{Database, Settings};
use tracing::debug;

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    debug!(path = path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    Settings::load(config).context("Failed to load settings")
}

/// Ask for a y/N confirmation on stdin
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a product:  pricetrack products add Milk --category Dairy --unit l");
    println!("  2. Log a price:    pricetrack prices log Milk 1.29");
    println!("  3. Or import:      pricetrack import --file prices.csv");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    println!();
    println!("📊 Pricetrack Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if !db_path.exists() {
        println!("   Size: (database not initialized)");
        println!();
        return Ok(());
    }

    if let Ok(metadata) = fs::metadata(db_path) {
        let size_kb = metadata.len() as f64 / 1024.0;
        if size_kb < 1024.0 {
            println!("   Size: {:.1} KB", size_kb);
        } else {
            println!("   Size: {:.1} MB", size_kb / 1024.0);
        }
    }

    match open_db(db_path).and_then(|db| db.stats().map_err(Into::into)) {
        Ok(stats) => {
            println!();
            println!("   Products: {}", stats.product_count);
            println!("   Price records: {}", stats.record_count);
            if let (Some(first), Some(last)) = (stats.first_record, stats.last_record) {
                println!(
                    "   Range: {} → {}",
                    first.format("%Y-%m-%d"),
                    last.format("%Y-%m-%d")
                );
            }
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening database: {}", e);
        }
    }

    println!();
    Ok(())
}

/// Delete every product and price record
pub fn cmd_reset(db_path: &Path, yes: bool) -> Result<()> {
    if !db_path.exists() {
        anyhow::bail!("Database not found: {}", db_path.display());
    }

    if !yes {
        println!("⚠️  This will delete all products and price history.");
        println!();
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let db = open_db(db_path)?;
    db.reset()?;

    println!("✅ Database reset complete.");
    Ok(())
}
