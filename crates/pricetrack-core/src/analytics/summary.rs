//! Dashboard summary combining every engine output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{PriceRecord, Product};

use super::anomalies::detect_anomalies;
use super::basket::{current_basket_cost, previous_month_basket_cost};
use super::category::category_inflation;
use super::cpi::{average_annual_inflation, estimated_monthly_growth_rate, monthly_cpi};
use super::forecast::forecast;
use super::purchasing_power::purchasing_power_history;
use super::types::{
    percent_change, CategoryInflation, CpiPoint, ForecastPoint, PriceAnomaly,
    PurchasingPowerPoint, YearOverYear,
};
use super::year_over_year::year_over_year;

/// Inputs that are not part of the data snapshot
#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    /// Monthly salary for purchasing power; skipped when `None`
    pub salary: Option<f64>,
    /// Forecast horizon in months
    pub forecast_months: u32,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            salary: None,
            forecast_months: 12,
        }
    }
}

/// Everything the dashboard shows, computed from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationSummary {
    pub as_of: DateTime<Utc>,
    pub product_count: usize,
    pub record_count: usize,
    pub current_cost: f64,
    pub previous_month_cost: f64,
    /// Month-over-month change; `None` when last month's basket was empty
    pub month_change_percent: Option<f64>,
    pub cpi: Vec<CpiPoint>,
    pub average_annual_inflation: f64,
    pub monthly_growth_rate: f64,
    /// Projection of `current_cost` at `monthly_growth_rate`
    pub forecast: Vec<ForecastPoint>,
    pub purchasing_power: Vec<PurchasingPowerPoint>,
    pub anomalies: Vec<PriceAnomaly>,
    pub categories: Vec<CategoryInflation>,
    pub year_over_year: Option<YearOverYear>,
}

impl InflationSummary {
    pub fn compute(
        products: &[Product],
        records: &[PriceRecord],
        options: SummaryOptions,
        now: DateTime<Utc>,
    ) -> Self {
        let current_cost = current_basket_cost(products, records, now);
        let previous_month_cost = previous_month_basket_cost(products, records, now);
        let month_change_percent =
            (previous_month_cost > 0.0).then(|| percent_change(previous_month_cost, current_cost));

        let cpi = monthly_cpi(products, records, now);
        let monthly_growth_rate = estimated_monthly_growth_rate(&cpi);
        let purchasing_power = options
            .salary
            .map(|salary| purchasing_power_history(salary, products, records, now))
            .unwrap_or_default();

        debug!(
            products = products.len(),
            records = records.len(),
            cpi_points = cpi.len(),
            "Computed inflation summary"
        );

        Self {
            as_of: now,
            product_count: products.len(),
            record_count: records.len(),
            current_cost,
            previous_month_cost,
            month_change_percent,
            average_annual_inflation: average_annual_inflation(&cpi),
            monthly_growth_rate,
            forecast: forecast(current_cost, monthly_growth_rate, options.forecast_months, now),
            purchasing_power,
            anomalies: detect_anomalies(products, records, now),
            categories: category_inflation(products, records, now),
            year_over_year: year_over_year(products, records, now),
            cpi,
        }
    }
}
