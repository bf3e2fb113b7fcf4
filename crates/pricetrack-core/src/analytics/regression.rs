//! Ordinary least-squares line fitting

use super::types::RegressionLine;

/// Fit `y = intercept + slope * x` to the given points
///
/// Degenerate inputs never fail: with fewer than two points the slope is 0
/// and the intercept is the single y value (or 0), and when every x is equal
/// the slope is 0 and the intercept is the mean of y.
pub fn linear_regression(points: &[(f64, f64)]) -> RegressionLine {
    let n = points.len();
    if n <= 1 {
        return RegressionLine {
            slope: 0.0,
            intercept: points.first().map(|(_, y)| *y).unwrap_or(0.0),
        };
    }

    let n_f = n as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), (x, y)| (sx + x, sy + y, sxy + x * y, sx2 + x * x),
    );

    // Zero up to rounding, relative to the magnitude of the terms
    let denominator = n_f * sum_x2 - sum_x * sum_x;
    if denominator.abs() <= f64::EPSILON * n_f * sum_x2 {
        return RegressionLine {
            slope: 0.0,
            intercept: sum_y / n_f,
        };
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;
    RegressionLine { slope, intercept }
}

/// Fit a line to a series indexed by position (x = 0, 1, 2, ...)
pub fn trend(values: &[f64]) -> RegressionLine {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64, *y))
        .collect();
    linear_regression(&points)
}
