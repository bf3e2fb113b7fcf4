//! Pricetrack CLI - Personal inflation tracker
//!
//! Usage:
//!   pricetrack init                        Initialize database
//!   pricetrack prices log Milk 1.29        Log a price
//!   pricetrack import --file prices.csv    Import price history
//!   pricetrack report summary              Show every inflation report

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Products { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(ProductsAction::List) => commands::cmd_products_list(&db, &settings),
                Some(ProductsAction::Add {
                    name,
                    category,
                    unit,
                    image,
                }) => commands::cmd_products_add(
                    &db,
                    &name,
                    category.as_deref(),
                    unit.as_deref(),
                    image.as_deref(),
                )
                .map(|_| ()),
                Some(ProductsAction::Update {
                    id,
                    name,
                    category,
                    unit,
                }) => commands::cmd_products_update(&db, id, name, category, unit),
                Some(ProductsAction::Delete { id }) => commands::cmd_products_delete(&db, id),
            }
        }
        Commands::Prices { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                PricesAction::Log {
                    product,
                    price,
                    date,
                } => commands::cmd_prices_log(&db, &product, price, date.as_deref(), &settings)
                    .map(|_| ()),
                PricesAction::List { product, limit } => {
                    commands::cmd_prices_list(&db, product.as_deref(), limit, &settings)
                }
                PricesAction::Delete { id } => commands::cmd_prices_delete(&db, id),
            }
        }
        Commands::Report {
            as_of,
            json,
            report_type,
        } => {
            let db = commands::open_db(&cli.db)?;
            let ctx = commands::ReportContext {
                now: commands::resolve_as_of(as_of.as_deref())?,
                json,
                settings: &settings,
            };
            match report_type {
                ReportType::Basket => commands::cmd_report_basket(&db, &ctx),
                ReportType::Cpi => commands::cmd_report_cpi(&db, &ctx),
                ReportType::Forecast { months, rate } => {
                    commands::cmd_report_forecast(&db, &ctx, months, rate)
                }
                ReportType::Power { salary } => commands::cmd_report_power(&db, &ctx, salary),
                ReportType::Anomalies { min_change } => {
                    commands::cmd_report_anomalies(&db, &ctx, min_change)
                }
                ReportType::Categories => commands::cmd_report_categories(&db, &ctx),
                ReportType::Yoy => commands::cmd_report_yoy(&db, &ctx),
                ReportType::Summary { salary } => commands::cmd_report_summary(&db, &ctx, salary),
            }
        }
        Commands::Export { export_type } => {
            let db = commands::open_db(&cli.db)?;
            match export_type {
                ExportType::Csv { output } => commands::cmd_export_csv(&db, output.as_deref()),
                ExportType::Full { output } => commands::cmd_export_full(&db, &output),
            }
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &file)
        }
        Commands::ImportFull { file, clear, yes } => {
            commands::cmd_import_full(&cli.db, &file, clear, yes)
        }
        Commands::Reset { yes } => commands::cmd_reset(&cli.db, yes),
    }
}
