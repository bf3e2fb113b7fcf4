//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pricetrack - Measure your own inflation
#[derive(Parser)]
#[command(name = "pricetrack")]
#[command(about = "Personal inflation tracker built from the prices you pay", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "pricetrack.db", global = true)]
    pub db: PathBuf,

    /// Settings file (defaults to ~/.local/share/pricetrack/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (size, counts, date range)
    Status,

    /// Manage tracked products
    Products {
        #[command(subcommand)]
        action: Option<ProductsAction>,
    },

    /// Log and list observed prices
    Prices {
        #[command(subcommand)]
        action: PricesAction,
    },

    /// Inflation reports
    Report {
        /// Compute as of the end of this day (YYYY-MM-DD, defaults to now)
        #[arg(long, global = true)]
        as_of: Option<String>,

        /// Print JSON instead of a table
        #[arg(long, global = true)]
        json: bool,

        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export data
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },

    /// Import price history from CSV (product,category,unit,date,price)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Import a full JSON backup
    ImportFull {
        /// JSON backup file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Clear all existing data before import
        #[arg(long)]
        clear: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete all products and prices
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products
    List,

    /// Add a product to the basket
    Add {
        /// Product name
        name: String,

        /// Category (defaults to "General")
        #[arg(short, long)]
        category: Option<String>,

        /// Unit of measure, e.g. "kg" or "l"
        #[arg(short, long)]
        unit: Option<String>,

        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Update a product
    Update {
        /// Product ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New category (empty resets to "General")
        #[arg(short, long)]
        category: Option<String>,

        /// New unit
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Delete a product and its price history
    Delete {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum PricesAction {
    /// Log a price
    Log {
        /// Product ID or name
        product: String,

        /// Price paid (must be > 0)
        price: f64,

        /// Date observed (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recent prices, newest first
    List {
        /// Only this product (ID or name)
        #[arg(short, long)]
        product: Option<String>,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete a price record
    Delete {
        /// Price record ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Current basket cost and change since last month
    Basket,

    /// Monthly personal CPI vs. reference inflation
    Cpi,

    /// Project the basket cost forward
    Forecast {
        /// Months to project (defaults to settings.forecast_months)
        #[arg(short, long)]
        months: Option<u32>,

        /// Monthly growth in percent (defaults to the estimated trend)
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },

    /// Baskets a monthly salary buys over time
    Power {
        /// Monthly salary (defaults to settings.salary)
        #[arg(short, long)]
        salary: Option<f64>,
    },

    /// Products whose price moved in the last month
    Anomalies {
        /// Hide changes smaller than this percentage
        #[arg(long)]
        min_change: Option<f64>,
    },

    /// Inflation per category over the last month
    Categories,

    /// Basket cost now vs. one year ago
    Yoy,

    /// Every report at once
    Summary {
        /// Monthly salary for purchasing power (defaults to settings.salary)
        #[arg(short, long)]
        salary: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export price history to CSV
    Csv {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the full database as JSON
    Full {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}
