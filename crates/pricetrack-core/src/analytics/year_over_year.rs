//! Year-over-year basket comparison

use chrono::{DateTime, Utc};

use crate::models::{PriceRecord, Product};

use super::basket::basket_cost_at;
use super::calendar::{add_months, month_label};
use super::types::{percent_change, YearOverYear};

/// Basket cost now vs. one calendar year earlier
///
/// `None` when nothing was logged a year ago (the year-ago basket is empty).
pub fn year_over_year(
    products: &[Product],
    records: &[PriceRecord],
    now: DateTime<Utc>,
) -> Option<YearOverYear> {
    let year_ago = add_months(now, -12);
    let year_ago_cost = basket_cost_at(year_ago, products, records);
    if year_ago_cost <= 0.0 {
        return None;
    }

    let current_cost = basket_cost_at(now, products, records);
    Some(YearOverYear {
        current_cost,
        year_ago_cost,
        change_percent: percent_change(year_ago_cost, current_cost),
        year_ago_label: month_label(year_ago),
    })
}
