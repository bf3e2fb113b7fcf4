//! Purchasing power: how many baskets a monthly salary buys over time

use chrono::{DateTime, Utc};

use crate::models::{PriceRecord, Product};

use super::basket::basket_cost_at;
use super::calendar::{add_months, month_label, monthly_grid};
use super::cpi::earliest_record_date;
use super::types::PurchasingPowerPoint;

/// Baskets affordable per month, from the first logged month through `now`
///
/// Uses the same month grid as the CPI series but keeps the first month.
/// Months with a zero basket cost are left out. Empty when `salary <= 0` or
/// there are no records.
pub fn purchasing_power_history(
    salary: f64,
    products: &[Product],
    records: &[PriceRecord],
    now: DateTime<Utc>,
) -> Vec<PurchasingPowerPoint> {
    if salary <= 0.0 {
        return Vec::new();
    }
    let Some(earliest) = earliest_record_date(records) else {
        return Vec::new();
    };

    monthly_grid(earliest, now)
        .into_iter()
        .filter_map(|month| {
            let cost = basket_cost_at(add_months(month, 1), products, records);
            (cost > 0.0).then(|| PurchasingPowerPoint {
                date: month,
                baskets_affordable: salary / cost,
                month_label: month_label(month),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, fixed_now, product, record};

    #[test]
    fn test_includes_first_month() {
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 1, 10.0, at(2026, 1, 10)),
            record(2, 1, 20.0, at(2026, 3, 10)),
        ];

        let points = purchasing_power_history(1000.0, &products, &records, fixed_now());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].month_label, "Jan 2026");
        assert!((points[0].baskets_affordable - 100.0).abs() < 1e-9);
        assert!((points[1].baskets_affordable - 100.0).abs() < 1e-9);
        assert!((points[2].baskets_affordable - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_month_still_reported() {
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![record(1, 1, 4.0, at(2026, 3, 2))];
        let points = purchasing_power_history(100.0, &products, &records, fixed_now());
        assert_eq!(points.len(), 1);
        assert!((points[0].baskets_affordable - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_salary_is_empty() {
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![record(1, 1, 4.0, at(2026, 1, 2))];
        assert!(purchasing_power_history(0.0, &products, &records, fixed_now()).is_empty());
        assert!(purchasing_power_history(-5.0, &products, &records, fixed_now()).is_empty());
    }

    #[test]
    fn test_no_records_is_empty() {
        let products = vec![product(1, "Milk", "Dairy")];
        assert!(purchasing_power_history(1000.0, &products, &[], fixed_now()).is_empty());
    }

    #[test]
    fn test_zero_cost_months_skipped() {
        // Only the unknown product has data in January
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 7, 3.0, at(2026, 1, 3)),
            record(2, 1, 5.0, at(2026, 2, 3)),
        ];
        let points = purchasing_power_history(50.0, &products, &records, fixed_now());
        let labels: Vec<&str> = points.iter().map(|p| p.month_label.as_str()).collect();
        assert_eq!(labels, vec!["Feb 2026", "Mar 2026"]);
    }
}
