//! Import/export command implementations

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pricetrack_core::{Database, FullBackup};

use super::{confirm, open_db};

/// Import price history from a CSV file
pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    println!("📥 Importing prices from {}...", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let stats = db.import_prices_csv(reader)?;

    println!("✅ Import complete!");
    println!("   Products created: {}", stats.products_created);
    println!("   Prices imported:  {}", stats.records_imported);
    Ok(())
}

/// Export price history as CSV to a file or stdout
pub fn cmd_export_csv(db: &Database, output: Option<&Path>) -> Result<()> {
    let csv = db.export_prices_csv()?;

    match output {
        Some(path) => {
            fs::write(path, &csv)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            // Header line is not a record
            let rows = csv.lines().count().saturating_sub(1);
            eprintln!("✅ Exported {} prices to {}", rows, path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

/// Export the whole database as a JSON backup
pub fn cmd_export_full(db: &Database, output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    println!("📦 Exporting full database backup...");

    let backup = db.export_full_backup()?;
    let json =
        serde_json::to_string_pretty(&backup).context("Failed to serialize backup to JSON")?;

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    file.write_all(json.as_bytes())?;

    println!("✅ Full backup exported to: {}", output.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Total records: {}", backup.metadata.total_records);
    println!();
    println!("   Products: {}", backup.products.len());
    println!("   Prices: {}", backup.price_records.len());

    Ok(())
}

/// Import a full JSON backup
pub fn cmd_import_full(db_path: &Path, input: &Path, clear: bool, yes: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Backup file not found: {}", input.display());
    }

    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read backup file: {}", input.display()))?;
    let backup: FullBackup =
        serde_json::from_str(&json).context("Failed to parse backup file as JSON")?;

    println!("📦 Importing full backup from: {}", input.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Created: {}", backup.metadata.created_at);
    println!("   Total records: {}", backup.metadata.total_records);
    println!();

    if !yes {
        let proceed = if clear {
            println!("⚠️  This will DELETE all existing data before importing.");
            println!("   Products: → {}", backup.products.len());
            println!("   Prices:   → {}", backup.price_records.len());
            println!();
            confirm("Are you sure?")?
        } else {
            println!("⚠️  Importing into existing database. This fails if IDs overlap.");
            println!("   Use --clear to replace all existing data instead.");
            println!();
            confirm("Continue?")?
        };
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let db = open_db(db_path)?;
    let stats = db.import_full_backup(&backup, clear)?;

    println!("✅ Import complete!");
    println!("   Products: {}", stats.products_created);
    println!("   Prices: {}", stats.records_imported);

    Ok(())
}
