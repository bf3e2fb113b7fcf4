//! Basket cost aggregation
//!
//! The basket is every tracked product; its cost at a date is the sum of each
//! product's latest known price on or before that date. Products without a
//! price yet contribute nothing.

use chrono::{DateTime, Utc};

use crate::models::{PriceRecord, Product};

use super::calendar::add_months;

/// Latest record for `product_id` whose date satisfies `accept`
pub(crate) fn latest_record<'a, F>(
    records: &'a [PriceRecord],
    product_id: i64,
    accept: F,
) -> Option<&'a PriceRecord>
where
    F: Fn(DateTime<Utc>) -> bool,
{
    records
        .iter()
        .filter(|r| r.product_id == product_id && accept(r.recorded_at))
        .max_by_key(|r| r.recorded_at)
}

/// Latest price for a product on or before `date`
pub fn price_at(date: DateTime<Utc>, product_id: i64, records: &[PriceRecord]) -> Option<f64> {
    latest_record(records, product_id, |at| at <= date).map(|r| r.price)
}

/// Sum of each product's latest price on or before `date`
pub fn basket_cost_at(date: DateTime<Utc>, products: &[Product], records: &[PriceRecord]) -> f64 {
    products
        .iter()
        .map(|p| price_at(date, p.id, records).unwrap_or(0.0))
        .sum()
}

/// Basket cost as of `now`
pub fn current_basket_cost(products: &[Product], records: &[PriceRecord], now: DateTime<Utc>) -> f64 {
    basket_cost_at(now, products, records)
}

/// Basket cost one calendar month before `now`
pub fn previous_month_basket_cost(
    products: &[Product],
    records: &[PriceRecord],
    now: DateTime<Utc>,
) -> f64 {
    basket_cost_at(add_months(now, -1), products, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{days_ago, fixed_now, product, record};
    use chrono::Duration;

    #[test]
    fn test_empty_inputs_cost_zero() {
        assert_eq!(basket_cost_at(fixed_now(), &[], &[]), 0.0);
        let products = vec![product(1, "Milk", "Dairy")];
        assert_eq!(basket_cost_at(fixed_now(), &products, &[]), 0.0);
    }

    #[test]
    fn test_uses_latest_price_on_or_before_date() {
        let now = fixed_now();
        let products = vec![product(1, "Milk", "Dairy"), product(2, "Bread", "Bakery")];
        let records = vec![
            record(1, 1, 1.00, days_ago(now, 60)),
            record(2, 1, 1.20, days_ago(now, 10)),
            record(3, 2, 2.50, days_ago(now, 40)),
            // Future observation is ignored
            record(4, 2, 9.99, now + Duration::days(3)),
        ];

        let cost = basket_cost_at(now, &products, &records);
        assert!((cost - 3.70).abs() < 1e-9);

        let earlier = basket_cost_at(days_ago(now, 30), &products, &records);
        assert!((earlier - 3.50).abs() < 1e-9);
    }

    #[test]
    fn test_record_exactly_at_date_counts() {
        let now = fixed_now();
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![record(1, 1, 1.10, now)];
        assert!((basket_cost_at(now, &products, &records) - 1.10).abs() < 1e-9);
    }

    #[test]
    fn test_product_added_after_date_contributes_zero() {
        let now = fixed_now();
        let products = vec![product(1, "Milk", "Dairy"), product(2, "Coffee", "Drinks")];
        let records = vec![
            record(1, 1, 1.00, days_ago(now, 90)),
            record(2, 2, 8.00, days_ago(now, 5)),
        ];
        let cost = basket_cost_at(days_ago(now, 30), &products, &records);
        assert!((cost - 1.00).abs() < 1e-9);
    }

    #[test]
    fn test_records_for_unknown_products_are_ignored() {
        let now = fixed_now();
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 1, 1.00, days_ago(now, 5)),
            record(2, 42, 100.0, days_ago(now, 5)),
        ];
        assert!((basket_cost_at(now, &products, &records) - 1.00).abs() < 1e-9);
    }

    #[test]
    fn test_current_and_previous_month() {
        let now = fixed_now();
        let products = vec![product(1, "Milk", "Dairy")];
        let records = vec![
            record(1, 1, 1.00, days_ago(now, 45)),
            record(2, 1, 1.50, days_ago(now, 5)),
        ];
        assert!((current_basket_cost(&products, &records, now) - 1.50).abs() < 1e-9);
        assert!((previous_month_basket_cost(&products, &records, now) - 1.00).abs() < 1e-9);
    }
}
