//! Sorted-quantile interpolation and probability ladders.
//!
//! All quantiles in this crate are computed the same way: for a sorted sample of
//! size `n` and probability `p`, the fractional rank is `p * (n - 1)` and the
//! value is linearly interpolated between the order statistics at the floor and
//! ceiling of that rank.
//!
//! Probabilities are used as join keys between independently computed ladders,
//! so every probability produced here is passed through [`round_key`] first.

/// Number of decimal digits kept by [`round_key`].
pub const KEY_DECIMALS: i32 = 10;

/// Rounds a value to [`KEY_DECIMALS`] decimal digits.
///
/// Two ladders that compute the "same" probability through different
/// arithmetic (e.g. `0.07` vs `(2 + 5) / 100`) agree bit-for-bit after rounding.
///
/// # Examples
///
/// ```
/// use somnus_stats::quantile::round_key;
///
/// assert_eq!(round_key(0.1 + 0.2), 0.3);
/// assert_eq!(round_key(1.0 / 3.0), 0.333_333_333_3);
/// ```
#[must_use]
pub fn round_key(value: f64) -> f64 {
    let scale = 10_f64.powi(KEY_DECIMALS);
    (value * scale).round() / scale
}

/// Computes the `p`-quantile of sorted data using linear interpolation.
///
/// Returns `None` for an empty slice. Probabilities at or below 0 return the
/// minimum, probabilities at or above 1 return the maximum.
///
/// # Examples
///
/// ```
/// use somnus_stats::quantile::quantile_sorted;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile_sorted(&values, 0.5), Some(3.0));
/// assert_eq!(quantile_sorted(&values, 0.25), Some(2.0));
/// assert_eq!(quantile_sorted(&[], 0.5), None);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> Option<f64> {
    let n = sorted_values.len();
    let first = *sorted_values.first()?;
    if p <= 0.0 || n < 2 {
        return Some(first);
    }
    if p >= 1.0 {
        return sorted_values.last().copied();
    }
    let rank = (n - 1) as f64 * p;
    let lower = rank.floor() as usize;
    let lower_value = sorted_values[lower];
    let upper_value = sorted_values[lower + 1];
    Some(lower_value + (upper_value - lower_value) * (rank - lower as f64))
}

/// Probabilities for whole-percent points `lower_percent..=upper_percent`.
///
/// # Examples
///
/// ```
/// use somnus_stats::quantile::percent_probabilities;
///
/// let ps = percent_probabilities(5, 95);
/// assert_eq!(ps.len(), 91);
/// assert_eq!(ps[0], 0.05);
/// assert_eq!(ps[90], 0.95);
/// ```
#[must_use]
pub fn percent_probabilities(lower_percent: u32, upper_percent: u32) -> Vec<f64> {
    (lower_percent..=upper_percent)
        .map(|percent| round_key(f64::from(percent) / 100.0))
        .collect()
}

/// Probabilities at the centers of `count` equal-width slices of `(0, 1)`.
///
/// The k-th probability (1-based) is `(k - 0.5) / count`.
///
/// # Examples
///
/// ```
/// use somnus_stats::quantile::midpoint_probabilities;
///
/// assert_eq!(midpoint_probabilities(4), vec![0.125, 0.375, 0.625, 0.875]);
/// assert!(midpoint_probabilities(0).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn midpoint_probabilities(count: usize) -> Vec<f64> {
    let n = count as f64;
    (1..=count)
        .map(|k| round_key((0.5 + k as f64 - 1.0) / n))
        .collect()
}

/// A single `(p, q)` point of a quantile ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderPoint {
    /// Probability, rounded with [`round_key`].
    pub p: f64,
    /// Quantile value at `p`.
    pub q: f64,
}

/// Precomputed quantile values for a fixed list of probabilities.
///
/// Because every point is computed from the same sorted data, `q` never
/// decreases while `p` increases.
///
/// # Examples
///
/// ```
/// use somnus_stats::quantile::{Ladder, percent_probabilities};
///
/// let values = [4.0, 5.0, 6.0, 7.0, 8.0];
/// let ladder = Ladder::from_sorted(&values, &percent_probabilities(5, 95)).unwrap();
///
/// assert_eq!(ladder.len(), 91);
/// assert_eq!(ladder.get(0.5), Some(6.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    points: Vec<LadderPoint>,
}

impl Ladder {
    /// Computes the ladder from values sorted in ascending order.
    ///
    /// Returns `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], probabilities: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let points = probabilities
            .iter()
            .map(|&p| {
                let p = round_key(p);
                // non-empty input always yields a value
                let q = quantile_sorted(sorted_values, p).unwrap_or(f64::NAN);
                LadderPoint { p, q }
            })
            .collect();
        Some(Self { points })
    }

    /// Like [`Self::from_sorted`], but sorts a copy of `values` first.
    #[must_use]
    pub fn new(values: &[f64], probabilities: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, probabilities)
    }

    /// Gets the quantile value stored for probability `p`.
    ///
    /// `p` is rounded with [`round_key`] before the exact comparison.
    #[must_use]
    pub fn get(&self, p: f64) -> Option<f64> {
        let key = round_key(p);
        self.points
            .iter()
            .find(|point| point.p.total_cmp(&key).is_eq())
            .map(|point| point.q)
    }

    pub fn iter(&self) -> impl Iterator<Item = LadderPoint> + '_ {
        self.points.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LadderPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
