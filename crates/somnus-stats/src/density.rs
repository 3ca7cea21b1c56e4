//! Kernel density estimation.
//!
//! ```
//! use somnus_stats::density::{epanechnikov, kde};
//!
//! let data = [7.0, 7.5, 8.0];
//! let curve = kde(epanechnikov(1.0), &[7.5, 20.0], &data);
//! assert!(curve[0].1 > 0.0);
//! assert_eq!(curve[1].1, 0.0);
//! ```

/// Epanechnikov kernel with the given bandwidth.
///
/// `K(u) = 0.75 * (1 - (u / h)^2) / h` for `|u / h| <= 1`, zero elsewhere.
///
/// # Panics
///
/// Panics if `bandwidth` is not a positive finite number.
pub fn epanechnikov(bandwidth: f64) -> impl Fn(f64) -> f64 {
    assert!(
        bandwidth.is_finite() && bandwidth > 0.0,
        "bandwidth must be a positive finite number, got {bandwidth}"
    );
    move |x| {
        let u = x / bandwidth;
        if u.abs() <= 1.0 {
            0.75 * (1.0 - u * u) / bandwidth
        } else {
            0.0
        }
    }
}

/// Evaluates a kernel density estimate at each threshold.
///
/// Returns `(threshold, mean of kernel(threshold - d) over data)` pairs. The
/// result is empty when `data` is empty.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn kde<K>(kernel: K, thresholds: &[f64], data: &[f64]) -> Vec<(f64, f64)>
where
    K: Fn(f64) -> f64,
{
    if data.is_empty() {
        return vec![];
    }
    let n = data.len() as f64;
    thresholds
        .iter()
        .map(|&t| (t, data.iter().map(|&d| kernel(t - d)).sum::<f64>() / n))
        .collect()
}
