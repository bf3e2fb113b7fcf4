//! Inflation per product category across the one-month cutoff

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{PriceRecord, Product};

use super::anomalies::by_abs_change_desc;
use super::basket::latest_record;
use super::calendar::add_months;
use super::types::{percent_change, CategoryInflation};

/// Per-category basket change, sorted by descending absolute change
///
/// For each category, `current_cost` sums every product's latest price
/// strictly after the cutoff and `previous_cost` its latest price at or
/// before it (missing prices count as zero). Categories with no previous
/// cost are left out.
pub fn category_inflation(
    products: &[Product],
    records: &[PriceRecord],
    now: DateTime<Utc>,
) -> Vec<CategoryInflation> {
    let cutoff = add_months(now, -1);

    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for product in products {
        let previous = latest_record(records, product.id, |at| at <= cutoff)
            .map(|r| r.price)
            .unwrap_or(0.0);
        let current = latest_record(records, product.id, |at| at > cutoff)
            .map(|r| r.price)
            .unwrap_or(0.0);

        let entry = totals.entry(product.category_label()).or_insert((0.0, 0.0));
        entry.0 += previous;
        entry.1 += current;
    }

    let mut categories: Vec<CategoryInflation> = totals
        .into_iter()
        .filter(|(_, (previous, _))| *previous > 0.0)
        .map(|(category, (previous, current))| CategoryInflation {
            category: category.to_string(),
            change_percent: percent_change(previous, current),
            previous_cost: previous,
            current_cost: current,
        })
        .collect();

    categories.sort_by(|a, b| by_abs_change_desc(a.change_percent, b.change_percent));
    categories
}
