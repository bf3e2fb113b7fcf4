//! Basket cost forecast by compound monthly growth

use chrono::{DateTime, Utc};

use super::calendar::{add_months, month_label};
use super::types::ForecastPoint;

/// Project `current_cost` forward at `monthly_growth_percent` per month
///
/// Returns `months + 1` points; point 0 is `now` at the current cost and
/// point `m` is `current_cost * (1 + rate)^m`, one calendar month apart.
pub fn forecast(
    current_cost: f64,
    monthly_growth_percent: f64,
    months: u32,
    now: DateTime<Utc>,
) -> Vec<ForecastPoint> {
    let rate = monthly_growth_percent / 100.0;
    (0..=months)
        .map(|m| {
            let offset = i32::try_from(m).unwrap_or(i32::MAX);
            let date = add_months(now, offset);
            ForecastPoint {
                date,
                projected_cost: current_cost * (1.0 + rate).powi(offset),
                month_label: month_label(date),
            }
        })
        .collect()
}
