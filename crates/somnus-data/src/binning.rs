//! Age binning of sample records.
//!
//! Records are partitioned by the intervals of an [`AgeLadder`]: bin `i` holds
//! ages in `[start, end)`, and the last bin also holds ages equal to its `end`.
//! Every non-degenerate interval yields exactly one bin, even when no record
//! falls into it. Records outside the ladder's domain and records with a
//! non-finite sleep time are counted, not binned.
//!
//! The members of each bin are sorted by sleep time so that downstream
//! quantile lookups can index into them directly.

use somnus_stats::density::{epanechnikov, kde};

use crate::{config::AgeLadder, sample::SampleRecord};

/// Records whose age falls into `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBin {
    pub start: f64,
    pub end: f64,
    /// Members sorted ascending by sleep time.
    pub members: Vec<SampleRecord>,
}

impl AgeBin {
    /// Sleep times of the members in ascending order.
    #[must_use]
    pub fn sleep_times(&self) -> Vec<f64> {
        self.members.iter().map(|r| r.sleep_time).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Epanechnikov kernel density of the members' sleep times over `grid`.
    ///
    /// Empty for an empty bin.
    ///
    /// # Panics
    ///
    /// Panics if `bandwidth` is not a positive finite number.
    #[must_use]
    pub fn density(&self, bandwidth: f64, grid: &[f64]) -> Vec<(f64, f64)> {
        kde(epanechnikov(bandwidth), grid, &self.sleep_times())
    }
}

/// Result of partitioning a sample population by age.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBinning {
    /// One bin per non-degenerate ladder interval, in ascending age order.
    pub bins: Vec<AgeBin>,
    /// Number of records whose age lies outside the ladder's domain.
    pub outside_domain: usize,
    /// Number of records dropped because their sleep time is NaN or infinite.
    pub invalid_sleep_time: usize,
}

impl AgeBinning {
    /// Partitions `samples` by the intervals of `ladder`.
    pub fn new<I>(samples: I, ladder: &AgeLadder) -> Self
    where
        I: IntoIterator<Item = SampleRecord>,
    {
        let mut bins = ladder
            .intervals()
            .map(|(start, end)| AgeBin {
                start,
                end,
                members: vec![],
            })
            .collect::<Vec<_>>();

        let mut outside_domain = 0;
        let mut invalid_sleep_time = 0;
        for record in samples {
            if !record.sleep_time.is_finite() {
                invalid_sleep_time += 1;
                continue;
            }
            match ladder.bin_index(record.age) {
                Some(index) => bins[index].members.push(record),
                None => outside_domain += 1,
            }
        }

        for bin in &mut bins {
            bin.members
                .sort_by(|a, b| a.sleep_time.total_cmp(&b.sleep_time));
        }

        tracing::debug!(
            bins = bins.len(),
            outside_domain,
            invalid_sleep_time,
            "partitioned samples by age"
        );
        Self {
            bins,
            outside_domain,
            invalid_sleep_time,
        }
    }

    /// Total number of binned records.
    #[must_use]
    pub fn binned_count(&self) -> usize {
        self.bins.iter().map(AgeBin::len).sum()
    }
}
