//! Box-plot statistics: quartiles, outlier fence, whiskers and outliers.

use crate::quantile::quantile_sorted;

/// Box-plot summary of a dataset.
///
/// Quartiles use the same interpolation as [`quantile_sorted`]. The fence
/// extends `1.5 * IQR` beyond the first and third quartiles, clipped to the
/// data range; values strictly outside the fence are outliers.
///
/// # Examples
///
/// ```
/// use somnus_stats::boxplot::BoxStats;
///
/// let stats = BoxStats::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
/// assert_eq!(stats.quartiles, [2.25, 3.5, 4.75]);
/// assert_eq!(stats.range, [1.0, 8.5]);
/// assert_eq!(stats.whiskers, [1.0, 5.0]);
/// assert_eq!(stats.outliers, vec![100.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// First quartile, median and third quartile.
    pub quartiles: [f64; 3],
    /// Outlier fence `[r0, r1]`.
    ///
    /// `r0 = max(min, q1 - 1.5 * IQR)` and `r1 = min(max, q3 + 1.5 * IQR)`.
    pub range: [f64; 2],
    /// Smallest and largest values inside the fence.
    pub whiskers: [f64; 2],
    /// Values strictly outside the fence, in ascending order.
    pub outliers: Vec<f64>,
    /// Number of values summarized.
    pub count: usize,
}

impl BoxStats {
    /// Multiple of the interquartile range used for the outlier fence.
    pub const FENCE_FACTOR: f64 = 1.5;

    /// Computes box statistics from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes box statistics from values sorted in ascending order.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let q1 = quantile_sorted(sorted_values, 0.25)?;
        let q2 = quantile_sorted(sorted_values, 0.5)?;
        let q3 = quantile_sorted(sorted_values, 0.75)?;
        let iqr = q3 - q1;
        let r0 = f64::max(min, q1 - iqr * Self::FENCE_FACTOR);
        let r1 = f64::min(max, q3 + iqr * Self::FENCE_FACTOR);

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted_values
            .iter()
            .partition(|&&v| (r0..=r1).contains(&v));
        let whiskers = [
            inside.first().copied().unwrap_or(r0),
            inside.last().copied().unwrap_or(r1),
        ];

        Some(Self {
            quartiles: [q1, q2, q3],
            range: [r0, r1],
            whiskers,
            outliers,
            count: sorted_values.len(),
        })
    }

    /// Interquartile range `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.quartiles[2] - self.quartiles[0]
    }

    #[must_use]
    pub fn median(&self) -> f64 {
        self.quartiles[1]
    }
}
