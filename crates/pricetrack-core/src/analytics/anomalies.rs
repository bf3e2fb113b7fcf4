//! Price anomaly detection
//!
//! Compares each product's latest price after a one-month-ago cutoff with its
//! latest price at or before the cutoff. Both sides must exist: a product with
//! only old or only new prices is not an anomaly. This differs from basket
//! cost, where a missing price counts as zero.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{PriceRecord, Product};

use super::basket::latest_record;
use super::calendar::add_months;
use super::types::{percent_change, PriceAnomaly};

/// Order by descending absolute change
pub(crate) fn by_abs_change_desc(a: f64, b: f64) -> Ordering {
    b.abs().total_cmp(&a.abs())
}

/// Products whose price moved across the one-month cutoff
///
/// Sorted by descending absolute `change_percent`.
pub fn detect_anomalies(
    products: &[Product],
    records: &[PriceRecord],
    now: DateTime<Utc>,
) -> Vec<PriceAnomaly> {
    let cutoff = add_months(now, -1);

    let mut anomalies: Vec<PriceAnomaly> = products
        .iter()
        .filter_map(|product| {
            let recent = latest_record(records, product.id, |at| at > cutoff)?;
            let older = latest_record(records, product.id, |at| at <= cutoff)?;
            if older.price <= 0.0 {
                return None;
            }
            Some(PriceAnomaly {
                product_id: product.id,
                product_name: product.name.clone(),
                previous_price: older.price,
                current_price: recent.price,
                change_percent: percent_change(older.price, recent.price),
            })
        })
        .collect();

    anomalies.sort_by(|a, b| by_abs_change_desc(a.change_percent, b.change_percent));
    anomalies
}
