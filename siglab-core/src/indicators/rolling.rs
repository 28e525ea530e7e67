//! Trailing rolling mean with a minimum-observation floor.
//!
//! The window at index i covers `values[i.saturating_sub(window-1)..=i]`,
//! so the current value is included and early windows are truncated rather
//! than skipped. Positions with fewer than `min_periods` observations (or
//! any NaN inside the window) yield NaN.

/// Rolling mean of `values` over a trailing window.
///
/// `min_periods` is clamped into `1..=window`; passing 0 behaves as 1.
pub fn rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 {
        return result;
    }
    let min_periods = min_periods.clamp(1, window);

    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        if slice.len() < min_periods {
            continue;
        }
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = slice.iter().sum::<f64>() / slice.len() as f64;
    }

    result
}
