//! Reference inflation rates
//!
//! Approximate annual consumer price inflation, used only as a comparison
//! line next to the personal CPI. These values are never derived from user
//! data.

/// Rate used for years not present in [`REFERENCE_RATES`]
pub const DEFAULT_ANNUAL_RATE: f64 = 3.0;

/// (year, approximate annual inflation in percent)
pub const REFERENCE_RATES: &[(i32, f64)] = &[
    (2015, 0.1),
    (2016, 1.3),
    (2017, 2.1),
    (2018, 2.4),
    (2019, 1.8),
    (2020, 1.2),
    (2021, 4.7),
    (2022, 8.0),
    (2023, 4.1),
    (2024, 2.9),
    (2025, 2.7),
];

/// Approximate annual inflation for `year`, in percent
pub fn reference_annual_rate(year: i32) -> f64 {
    REFERENCE_RATES
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_ANNUAL_RATE)
}

/// Monthly share of the annual reference rate
pub fn reference_monthly_rate(year: i32) -> f64 {
    reference_annual_rate(year) / 12.0
}
