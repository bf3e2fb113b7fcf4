//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;
use pricetrack_core::analytics::PriceAnomaly;
use pricetrack_core::test_utils::{fixed_now, seeded_database};
use pricetrack_core::{Database, Settings};

use crate::cli::{Cli, Commands, ReportType};
use crate::commands::{self, truncate, ReportContext};

fn ctx(settings: &Settings, json: bool) -> ReportContext<'_> {
    ReportContext {
        now: fixed_now(),
        json,
        settings,
    }
}

fn anomaly(name: &str, change_percent: f64) -> PriceAnomaly {
    PriceAnomaly {
        product_id: 1,
        product_name: name.to_string(),
        previous_price: 1.0,
        current_price: 1.0 + change_percent / 100.0,
        change_percent,
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_report_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pricetrack", "report", "forecast", "--months", "6", "--rate", "-0.5", "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Report {
            json,
            as_of,
            report_type: ReportType::Forecast { months, rate },
        } => {
            assert!(json);
            assert!(as_of.is_none());
            assert_eq!(months, Some(6));
            assert_eq!(rate, Some(-0.5));
        }
        _ => panic!("expected report forecast"),
    }
}

#[test]
fn test_parse_global_db_flag() {
    let cli = Cli::try_parse_from(["pricetrack", "status", "--db", "/tmp/prices.db"]).unwrap();
    assert_eq!(cli.db, std::path::PathBuf::from("/tmp/prices.db"));
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_prices_log() {
    let cli = Cli::try_parse_from(["pricetrack", "prices", "log", "Milk", "1.29", "--date", "2026-01-05"]);
    assert!(cli.is_ok());
    assert!(Cli::try_parse_from(["pricetrack", "prices", "log", "Milk", "cheap"]).is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Milk", 10), "Milk");
    assert_eq!(truncate("Organic whole milk", 10), "Organic...");
    assert_eq!(truncate("Crème fraîche épaisse", 8), "Crème...");
}

#[test]
fn test_resolve_as_of() {
    let end_of_day = commands::resolve_as_of(Some("2026-03-15")).unwrap();
    assert_eq!(end_of_day.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-03-15 23:59:59");

    assert!(commands::resolve_as_of(Some("15/03/2026")).is_err());
    assert!(commands::resolve_as_of(None).is_ok());
}

#[test]
fn test_filter_anomalies() {
    let anomalies = vec![anomaly("Bread", 25.0), anomaly("Milk", -4.0), anomaly("Salt", 0.0)];

    let all = commands::filter_anomalies(anomalies.clone(), 0.0);
    assert_eq!(all.len(), 3);

    let big = commands::filter_anomalies(anomalies, 4.0);
    let names: Vec<&str> = big.iter().map(|a| a.product_name.as_str()).collect();
    assert_eq!(names, vec!["Bread", "Milk"]);
}

// ========== Products Command Tests ==========

#[test]
fn test_cmd_products_add_and_update() {
    let db = Database::in_memory().unwrap();
    let id = commands::cmd_products_add(&db, "Butter", Some("Dairy"), Some("250g"), None).unwrap();

    let product = db.get_product(id).unwrap().unwrap();
    assert_eq!(product.category, "Dairy");

    commands::cmd_products_update(&db, id, Some("Salted Butter".to_string()), None, None)
        .unwrap();
    assert_eq!(db.get_product(id).unwrap().unwrap().name, "Salted Butter");

    assert!(commands::cmd_products_update(&db, id, None, None, None).is_err());
}

#[test]
fn test_cmd_products_add_with_image() {
    let db = Database::in_memory().unwrap();
    let mut image = tempfile::NamedTempFile::new().unwrap();
    image.write_all(&[0x89, 0x50, 0x4e, 0x47]).unwrap();

    let id = commands::cmd_products_add(&db, "Tea", None, None, Some(image.path())).unwrap();
    let product = db.get_product(id).unwrap().unwrap();
    assert_eq!(product.image.as_deref(), Some(&[0x89, 0x50, 0x4e, 0x47][..]));

    let missing = std::path::Path::new("/nonexistent/tea.png");
    assert!(commands::cmd_products_add(&db, "Tea", None, None, Some(missing)).is_err());
}

#[test]
fn test_cmd_products_list_and_delete() {
    let (db, [milk, _, _]) = seeded_database();
    assert!(commands::cmd_products_list(&db, &Settings::default()).is_ok());

    commands::cmd_products_delete(&db, milk).unwrap();
    assert!(db.get_product(milk).unwrap().is_none());
    assert!(commands::cmd_products_delete(&db, milk).is_err());
}

// ========== Prices Command Tests ==========

#[test]
fn test_cmd_prices_log_by_name_and_id() {
    let db = Database::in_memory().unwrap();
    let settings = Settings::default();
    let id = commands::cmd_products_add(&db, "Eggs", None, None, None).unwrap();

    let by_name =
        commands::cmd_prices_log(&db, "eggs", 3.49, Some("2026-01-05"), &settings).unwrap();
    let by_id =
        commands::cmd_prices_log(&db, &id.to_string(), 3.59, None, &settings).unwrap();

    let records = db.list_price_records_for_product(id).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, by_name);
    assert_eq!(records[0].recorded_at.format("%Y-%m-%d").to_string(), "2026-01-05");
    assert_eq!(records[1].id, by_id);
}

#[test]
fn test_cmd_prices_log_errors() {
    let db = Database::in_memory().unwrap();
    let settings = Settings::default();
    commands::cmd_products_add(&db, "Eggs", None, None, None).unwrap();

    assert!(commands::cmd_prices_log(&db, "Caviar", 1.0, None, &settings).is_err());
    assert!(commands::cmd_prices_log(&db, "Eggs", 0.0, None, &settings).is_err());
    assert!(commands::cmd_prices_log(&db, "Eggs", 1.0, Some("tomorrow"), &settings).is_err());
    assert!(db.list_price_records().unwrap().is_empty());
}

#[test]
fn test_cmd_prices_list_and_delete() {
    let (db, [milk, _, _]) = seeded_database();
    let settings = Settings::default();
    assert!(commands::cmd_prices_list(&db, None, 5, &settings).is_ok());
    assert!(commands::cmd_prices_list(&db, Some("Milk"), 5, &settings).is_ok());
    assert!(commands::cmd_prices_list(&db, Some("Nothing"), 5, &settings).is_err());

    let latest = db.latest_price_record(milk).unwrap().unwrap();
    commands::cmd_prices_delete(&db, latest.id).unwrap();
    assert!(commands::cmd_prices_delete(&db, latest.id).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_reports_on_seeded_database() {
    let (db, _) = seeded_database();
    let settings = Settings {
        salary: Some(3000.0),
        ..Settings::default()
    };

    for json in [false, true] {
        let ctx = ctx(&settings, json);
        assert!(commands::cmd_report_basket(&db, &ctx).is_ok());
        assert!(commands::cmd_report_cpi(&db, &ctx).is_ok());
        assert!(commands::cmd_report_forecast(&db, &ctx, Some(3), None).is_ok());
        assert!(commands::cmd_report_power(&db, &ctx, None).is_ok());
        assert!(commands::cmd_report_anomalies(&db, &ctx, Some(1.0)).is_ok());
        assert!(commands::cmd_report_categories(&db, &ctx).is_ok());
        assert!(commands::cmd_report_yoy(&db, &ctx).is_ok());
        assert!(commands::cmd_report_summary(&db, &ctx, None).is_ok());
    }
}

#[test]
fn test_reports_on_empty_database() {
    let db = Database::in_memory().unwrap();
    let settings = Settings::default();
    let ctx = ctx(&settings, false);

    assert!(commands::cmd_report_basket(&db, &ctx).is_ok());
    assert!(commands::cmd_report_cpi(&db, &ctx).is_ok());
    assert!(commands::cmd_report_forecast(&db, &ctx, None, None).is_ok());
    assert!(commands::cmd_report_anomalies(&db, &ctx, None).is_ok());
    assert!(commands::cmd_report_categories(&db, &ctx).is_ok());
    assert!(commands::cmd_report_yoy(&db, &ctx).is_ok());
    assert!(commands::cmd_report_summary(&db, &ctx, None).is_ok());
}

#[test]
fn test_report_power_needs_salary() {
    let (db, _) = seeded_database();
    let settings = Settings::default();
    let ctx = ctx(&settings, false);

    assert!(commands::cmd_report_power(&db, &ctx, None).is_err());
    assert!(commands::cmd_report_power(&db, &ctx, Some(-10.0)).is_err());
    assert!(commands::cmd_report_power(&db, &ctx, Some(0.0)).is_err());
    assert!(commands::cmd_report_power(&db, &ctx, Some(2500.0)).is_ok());
}

#[test]
fn test_zero_salary_from_settings_is_rejected() {
    let (db, _) = seeded_database();
    let settings = Settings {
        salary: Some(0.0),
        ..Settings::default()
    };
    let ctx = ctx(&settings, false);

    assert!(commands::cmd_report_power(&db, &ctx, None).is_err());
    assert!(commands::cmd_report_power(&db, &ctx, Some(1200.0)).is_ok());
}

// ========== Import/Export Command Tests ==========

#[test]
fn test_cmd_import_csv() {
    let db = Database::in_memory().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "product,category,date,price").unwrap();
    writeln!(file, "Milk,Dairy,2026-01-05,1.10").unwrap();
    writeln!(file, "Milk,Dairy,2026-02-05,1.15").unwrap();
    file.flush().unwrap();

    commands::cmd_import(&db, file.path()).unwrap();
    assert_eq!(db.list_price_records().unwrap().len(), 2);

    assert!(commands::cmd_import(&db, std::path::Path::new("/nonexistent.csv")).is_err());
}

#[test]
fn test_cmd_export_csv_to_file() {
    let (db, _) = seeded_database();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("prices.csv");

    commands::cmd_export_csv(&db, Some(&output)).unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("product,category,unit,date,price"));
    assert_eq!(content.lines().count(), 28);
}

#[test]
fn test_cmd_export_and_import_full() {
    let (db, _) = seeded_database();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("backup.json");

    commands::cmd_export_full(&db, &output).unwrap();
    // Refuses to overwrite
    assert!(commands::cmd_export_full(&db, &output).is_err());

    let target = dir.path().join("restored.db");
    commands::cmd_import_full(&target, &output, false, true).unwrap();

    let restored = commands::open_db(&target).unwrap();
    assert_eq!(restored.list_products().unwrap(), db.list_products().unwrap());
    assert_eq!(restored.list_price_records().unwrap().len(), 27);
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_status_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricetrack.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());
    assert!(commands::cmd_status(&path).is_ok());

    let db = commands::open_db(&path).unwrap();
    commands::cmd_products_add(&db, "Milk", None, None, None).unwrap();
    drop(db);

    commands::cmd_reset(&path, true).unwrap();
    let db = commands::open_db(&path).unwrap();
    assert!(db.list_products().unwrap().is_empty());

    let missing = dir.path().join("missing.db");
    assert!(commands::cmd_reset(&missing, true).is_err());
    assert!(commands::cmd_status(&missing).is_ok());
}

#[test]
fn test_load_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "forecast_months = 24").unwrap();
    file.flush().unwrap();

    let settings = commands::load_settings(Some(file.path())).unwrap();
    assert_eq!(settings.forecast_months, 24);
    assert!(commands::load_settings(Some(std::path::Path::new("/nonexistent.toml"))).is_err());
}
