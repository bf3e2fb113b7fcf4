//! Inflation Analytics Engine
//!
//! Pure functions that turn a snapshot of products and price records into
//! inflation metrics. Nothing here performs I/O or keeps state between
//! calls; every function recomputes from the records it is given, and "now"
//! is always an explicit argument so results are reproducible.
//!
//! ## Metrics
//!
//! - **Basket cost** - sum of each product's latest price at a date
//! - **Personal CPI** - cumulative basket change vs. the first month of data
//! - **Forecast** - compound projection of the current basket cost
//! - **Purchasing power** - baskets a monthly salary buys, month by month
//! - **Anomalies** - per-product price moves across a one-month cutoff
//! - **Category inflation** - the same comparison grouped by category
//! - **Year over year** - basket now vs. one calendar year ago
//!
//! Insufficient data is never an error: functions return an empty series,
//! zero, or `None`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pricetrack_core::analytics::{monthly_cpi, average_annual_inflation};
//!
//! let snapshot = db.snapshot()?;
//! let cpi = monthly_cpi(&snapshot.products, &snapshot.records, Utc::now());
//! println!("{:.1}% per year", average_annual_inflation(&cpi));
//! ```

pub mod anomalies;
pub mod basket;
pub mod calendar;
pub mod category;
pub mod cpi;
pub mod forecast;
pub mod purchasing_power;
pub mod reference;
pub mod regression;
pub mod summary;
pub mod types;
pub mod year_over_year;

pub use anomalies::detect_anomalies;
pub use basket::{basket_cost_at, current_basket_cost, previous_month_basket_cost, price_at};
pub use category::category_inflation;
pub use cpi::{average_annual_inflation, estimated_monthly_growth_rate, monthly_cpi};
pub use forecast::forecast;
pub use purchasing_power::purchasing_power_history;
pub use reference::{reference_annual_rate, reference_monthly_rate, DEFAULT_ANNUAL_RATE};
pub use regression::{linear_regression, trend};
pub use summary::{InflationSummary, SummaryOptions};
pub use types::{
    CategoryInflation, CpiPoint, ForecastPoint, PriceAnomaly, PurchasingPowerPoint,
    RegressionLine, YearOverYear,
};
pub use year_over_year::year_over_year;
