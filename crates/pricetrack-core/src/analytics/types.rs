//! Output types produced by the analytics engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One month of the personal CPI series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpiPoint {
    /// Start of the month this point describes
    pub date: DateTime<Utc>,
    /// Cumulative change of basket cost vs. the baseline month, in percent
    pub personal_cpi: f64,
    /// Cumulative reference inflation since the series start, in percent
    pub reference_cpi: f64,
    pub month_label: String,
}

/// Projected basket cost for a future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: DateTime<Utc>,
    pub projected_cost: f64,
    pub month_label: String,
}

/// How many baskets a salary buys in a given month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasingPowerPoint {
    pub date: DateTime<Utc>,
    pub baskets_affordable: f64,
    pub month_label: String,
}

/// A product whose price moved across the one-month cutoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnomaly {
    pub product_id: i64,
    pub product_name: String,
    pub previous_price: f64,
    pub current_price: f64,
    pub change_percent: f64,
}

/// Basket cost change for one category across the one-month cutoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInflation {
    pub category: String,
    pub change_percent: f64,
    pub previous_cost: f64,
    pub current_cost: f64,
}

/// Basket cost now vs. one calendar year ago
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    pub current_cost: f64,
    pub year_ago_cost: f64,
    pub change_percent: f64,
    pub year_ago_label: String,
}

/// Result of an ordinary least-squares fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    /// Value of the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Percentage change from `previous` to `current`
///
/// Callers guarantee `previous > 0`.
pub(crate) fn percent_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous * 100.0
}
