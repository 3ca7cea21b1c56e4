//! Dot density binning for quantile dot plots.
//!
//! Implements the binning pass from Leland Wilkinson, "Dot Plots",
//! The American Statistician, 1999, with the optional smoothing pass that
//! balances adjacent bins.
//!
//! # Algorithm
//!
//! 1. Scan the sorted values from the left, grouping every value that lies less
//!    than one `step` above the first value of the current group.
//! 2. Replace each closed group with its span midpoint, capped at
//!    `next_value - step` so that the group center never creeps into the next
//!    group's span.
//! 3. The last open group is replaced with its plain span midpoint.
//! 4. When smoothing, walk adjacent pairs of groups once. Two groups whose
//!    centers are less than `1.25 * step` apart are rebalanced around the
//!    midpoint index of their combined extent.
//!
//! # Examples
//!
//! ```
//! use somnus_stats::dotbin::dotbin;
//!
//! let x = dotbin(&[1.0, 1.05, 1.1, 2.0, 2.05], 0.5, false);
//! assert_eq!(x.len(), 5);
//! assert!(x[0] == x[1] && x[1] == x[2]);
//! assert!(x[3] == x[4]);
//! ```

/// Groups whose centers are closer than `step * ADJACENCY_FACTOR` are adjacent.
pub const ADJACENCY_FACTOR: f64 = 1.25;

/// Bins sorted values into dot positions.
///
/// The output has the same length and order as `sorted_values`; every element
/// is replaced with the center of the bin it belongs to.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order, or if `step` is
/// not a positive finite number.
#[must_use]
pub fn dotbin(sorted_values: &[f64], step: f64, smooth: bool) -> Vec<f64> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    assert!(
        step.is_finite() && step > 0.0,
        "step must be a positive finite number, got {step}"
    );

    let mut x = sorted_values.to_vec();
    let n = x.len();
    if n == 0 {
        return x;
    }

    let mut left = 0;
    for j in 1..n {
        if x[j] >= x[left] + step {
            let center = f64::min((x[left] + x[j - 1]) / 2.0, x[j] - step);
            x[left..j].fill(center);
            left = j;
        }
    }
    let center = (x[left] + x[n - 1]) / 2.0;
    x[left..].fill(center);

    if smooth {
        smooth_adjacent(&mut x, step);
    }

    x
}

/// Rebalances adjacent bins in place.
///
/// `x` must already be binned: runs of equal values are bins. Each loop
/// iteration advances the right bin boundary by at least one index, so the
/// pass is bounded by `x.len()`. All-equal input is a single bin and is left
/// untouched.
fn smooth_adjacent(x: &mut [f64], step: f64) {
    let n = x.len();
    let threshold = step * ADJACENCY_FACTOR;

    let mut a = 0;
    let mut b = run_end(x, a);
    while b < n {
        let c = run_end(x, b);

        let (left_center, right_center) = (x[a], x[b]);
        if right_center - left_center < threshold {
            let mid = (a + c) / 2;
            if mid < b {
                x[mid..b].fill(right_center);
            } else {
                x[b..mid].fill(left_center);
            }
        }

        a = b;
        b = c;
    }
}

/// Returns the index one past the run of values equal to `x[start]`.
fn run_end(x: &[f64], start: usize) -> usize {
    let value = x[start];
    start
        + x[start..]
            .iter()
            .take_while(|v| v.total_cmp(&value).is_eq())
            .count()
}
