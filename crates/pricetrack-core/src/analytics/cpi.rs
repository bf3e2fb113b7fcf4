//! Personal CPI series
//!
//! Personal CPI is the cumulative change of the basket cost relative to a
//! fixed anchor: the basket at the end of the first month with any data.
//! It is a ratio against that anchor, not month-over-month compounding, so
//! sparse logging does not make it drift.

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::models::{PriceRecord, Product};

use super::basket::basket_cost_at;
use super::calendar::{add_months, month_label, monthly_grid};
use super::reference::reference_monthly_rate;
use super::regression::trend;
use super::types::{percent_change, CpiPoint};

/// Earliest observation date across all records
pub(crate) fn earliest_record_date(records: &[PriceRecord]) -> Option<DateTime<Utc>> {
    records.iter().map(|r| r.recorded_at).min()
}

/// Build the monthly personal CPI series
///
/// Returns an empty series when there are no records, when the records cover
/// fewer than two calendar months up to `now`, or when the baseline basket
/// costs nothing. Months whose basket cost is still zero are left out.
pub fn monthly_cpi(products: &[Product], records: &[PriceRecord], now: DateTime<Utc>) -> Vec<CpiPoint> {
    let Some(earliest) = earliest_record_date(records) else {
        return Vec::new();
    };

    let grid = monthly_grid(earliest, now);
    if grid.len() < 2 {
        debug!(months = grid.len(), "Not enough months of data for CPI");
        return Vec::new();
    }

    let baseline = basket_cost_at(add_months(grid[0], 1), products, records);
    if baseline <= 0.0 {
        debug!("Baseline basket cost is zero, skipping CPI");
        return Vec::new();
    }

    let mut reference = 0.0;
    let mut series = Vec::with_capacity(grid.len() - 1);
    for month in &grid[1..] {
        let cost = basket_cost_at(add_months(*month, 1), products, records);
        if cost <= 0.0 {
            continue;
        }
        reference += reference_monthly_rate(month.year());
        series.push(CpiPoint {
            date: *month,
            personal_cpi: percent_change(baseline, cost),
            reference_cpi: reference,
            month_label: month_label(*month),
        });
    }
    series
}

/// Linear annualization of the cumulative CPI: `(last / N) * 12`
pub fn average_annual_inflation(series: &[CpiPoint]) -> f64 {
    match series.last() {
        Some(last) => last.personal_cpi / series.len() as f64 * 12.0,
        None => 0.0,
    }
}

/// Slope of the personal CPI series, in percent per month
///
/// Used as the default growth rate for forecasts. Zero with fewer than two
/// points.
pub fn estimated_monthly_growth_rate(series: &[CpiPoint]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let values: Vec<f64> = series.iter().map(|p| p.personal_cpi).collect();
    trend(&values).slope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, fixed_now, product, record};

    fn point(personal_cpi: f64) -> CpiPoint {
        CpiPoint {
            date: fixed_now(),
            personal_cpi,
            reference_cpi: 0.0,
            month_label: String::new(),
        }
    }

    #[test]
    fn test_no_records_is_empty() {
        let products = vec![product(1, "Milk", "Dairy")];
        assert!(monthly_cpi(&products, &[], fixed_now()).is_empty());
    }

    #[test]
    fn test_single_month_is_empty() {
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 1, 1.00, at(2026, 3, 2)),
            record(2, 1, 1.10, at(2026, 3, 10)),
        ];
        assert!(monthly_cpi(&products, &records, fixed_now()).is_empty());
    }

    #[test]
    fn test_zero_baseline_is_empty() {
        // Records only reference a product that is not in the basket
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 9, 1.00, at(2026, 1, 5)),
            record(2, 9, 1.10, at(2026, 2, 5)),
        ];
        assert!(monthly_cpi(&products, &records, fixed_now()).is_empty());
    }

    #[test]
    fn test_cumulative_against_baseline() {
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 1, 10.0, at(2026, 1, 10)),
            record(2, 1, 11.0, at(2026, 2, 10)),
            record(3, 1, 12.0, at(2026, 3, 10)),
        ];

        let series = monthly_cpi(&products, &records, fixed_now());
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].month_label, "Feb 2026");
        assert!((series[0].personal_cpi - 10.0).abs() < 1e-9);
        assert_eq!(series[1].month_label, "Mar 2026");
        assert!((series[1].personal_cpi - 20.0).abs() < 1e-9);

        // 2026 is outside the reference table: 3% / 12 per month
        assert!((series[0].reference_cpi - 0.25).abs() < 1e-9);
        assert!((series[1].reference_cpi - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_reference_accumulates_across_years() {
        let now = at(2025, 2, 15);
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![record(1, 1, 2.0, at(2024, 11, 5))];

        let series = monthly_cpi(&products, &records, now);
        let labels: Vec<&str> = series.iter().map(|p| p.month_label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2024", "Jan 2025", "Feb 2025"]);

        // Flat prices: no personal inflation
        assert!(series.iter().all(|p| p.personal_cpi.abs() < 1e-9));

        let expected = (2.9 + 2.7 + 2.7) / 12.0;
        assert!((series[2].reference_cpi - expected).abs() < 1e-9);
    }

    #[test]
    fn test_new_product_raises_cpi() {
        // A product first logged after the baseline adds to later basket costs
        let products = vec![product(1, "Milk", "Dairy"), product(2, "Bread", "Bakery")];
        let records = vec![
            record(1, 1, 2.0, at(2026, 1, 10)),
            record(2, 2, 2.0, at(2026, 2, 10)),
        ];
        let series = monthly_cpi(&products, &records, fixed_now());
        assert!((series[0].personal_cpi - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 1, 10.0, at(2025, 10, 10)),
            record(2, 1, 10.5, at(2025, 12, 10)),
            record(3, 1, 11.0, at(2026, 3, 1)),
        ];
        let first = monthly_cpi(&products, &records, fixed_now());
        let second = monthly_cpi(&products, &records, fixed_now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_average_annual_inflation() {
        let series: Vec<CpiPoint> = [1.0, 3.0, 5.0, 8.0, 10.0, 12.0].into_iter().map(point).collect();
        assert!((average_annual_inflation(&series) - 24.0).abs() < 1e-9);
        assert_eq!(average_annual_inflation(&[]), 0.0);
    }

    #[test]
    fn test_estimated_monthly_growth_rate() {
        let series: Vec<CpiPoint> = [0.0, 2.0, 4.0, 6.0].into_iter().map(point).collect();
        assert!((estimated_monthly_growth_rate(&series) - 2.0).abs() < 1e-9);
        assert_eq!(estimated_monthly_growth_rate(&series[..1]), 0.0);
    }
}
