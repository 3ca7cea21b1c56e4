//! Per-bin summaries: percentile ladders, quantile dots and box statistics.
//!
//! Each summary is computed independently from one [`AgeBin`] and tagged with
//! the bin's `(x0, x1)` edges. The dataset assembler later joins the three
//! kinds of results on those edges.
//!
//! Empty bins produce no summaries.

use somnus_stats::{
    boxplot::BoxStats,
    dotbin::dotbin,
    quantile::{Ladder, midpoint_probabilities, percent_probabilities},
};

use crate::{binning::AgeBin, config::PipelineConfig};

/// A per-bin result tagged with the edges of the bin it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct BinResult<T> {
    pub x0: f64,
    pub x1: f64,
    pub value: T,
}

impl<T> BinResult<T> {
    fn for_bin(bin: &AgeBin, value: T) -> Self {
        Self {
            x0: bin.start,
            x1: bin.end,
            value,
        }
    }

    /// Whether this result belongs to the bin `[x0, x1)`.
    #[must_use]
    pub fn matches(&self, x0: f64, x1: f64) -> bool {
        self.x0 == x0 && self.x1 == x1
    }
}

/// One point of a bin's percentile ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileEntry {
    /// Probability in `(0, 1)`.
    pub p: f64,
    /// Sleep time at `p`.
    pub q: f64,
    pub id: String,
}

/// One equally spaced quantile used as dot plot input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileEntry {
    pub p: f64,
    pub q: f64,
}

/// A quantile together with its binned display position.
#[derive(Debug, Clone, PartialEq)]
pub struct DotPosition {
    pub p: f64,
    /// Source quantile value.
    pub q: f64,
    /// Display position after dot density binning.
    pub x: f64,
    pub id: String,
}

/// Percentile ladder `lower_percent..=upper_percent` of a bin.
#[must_use]
pub fn percentile_ladder(
    bin: &AgeBin,
    lower_percent: u32,
    upper_percent: u32,
) -> Option<BinResult<Vec<PercentileEntry>>> {
    let ladder = Ladder::from_sorted(
        &bin.sleep_times(),
        &percent_probabilities(lower_percent, upper_percent),
    )?;
    let entries = ladder
        .iter()
        .map(|point| PercentileEntry {
            p: point.p,
            q: point.q,
            id: format!("percentile-{}", point.p),
        })
        .collect();
    Some(BinResult::for_bin(bin, entries))
}

/// `count` equally spaced quantiles of a bin.
#[must_use]
pub fn quantile_sample(bin: &AgeBin, count: usize) -> Option<BinResult<Vec<QuantileEntry>>> {
    let ladder = Ladder::from_sorted(&bin.sleep_times(), &midpoint_probabilities(count))?;
    let entries = ladder
        .iter()
        .map(|point| QuantileEntry {
            p: point.p,
            q: point.q,
        })
        .collect();
    Some(BinResult::for_bin(bin, entries))
}

/// Dot density positions for a bin's quantile sample.
///
/// # Panics
///
/// Panics if `step` is not a positive finite number.
#[must_use]
pub fn dot_positions(
    quantiles: &BinResult<Vec<QuantileEntry>>,
    step: f64,
    smooth: bool,
) -> BinResult<Vec<DotPosition>> {
    let mut values = quantiles.value.iter().map(|e| e.q).collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);
    let xs = dotbin(&values, step, smooth);

    let dots = quantiles
        .value
        .iter()
        .zip(xs)
        .map(|(entry, x)| DotPosition {
            p: entry.p,
            q: entry.q,
            x,
            id: format!("dot-{}", entry.p),
        })
        .collect();
    BinResult {
        x0: quantiles.x0,
        x1: quantiles.x1,
        value: dots,
    }
}

/// Box statistics of a bin's sleep times.
#[must_use]
pub fn box_stats(bin: &AgeBin) -> Option<BinResult<BoxStats>> {
    let stats = BoxStats::from_sorted(&bin.sleep_times())?;
    Some(BinResult::for_bin(bin, stats))
}

/// All per-bin results of one pipeline run, kept as separate lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinSummaries {
    pub percentiles: Vec<BinResult<Vec<PercentileEntry>>>,
    pub dots: Vec<BinResult<Vec<DotPosition>>>,
    pub boxes: Vec<BinResult<BoxStats>>,
}

impl BinSummaries {
    /// Summarizes every bin. Bins are independent of one another.
    #[must_use]
    pub fn compute(bins: &[AgeBin], config: &PipelineConfig) -> Self {
        let mut summaries = Self::default();
        for bin in bins {
            if let Some(percentiles) =
                percentile_ladder(bin, config.percentile_lower, config.percentile_upper)
            {
                summaries.percentiles.push(percentiles);
            }
            if let Some(quantiles) = quantile_sample(bin, config.quantile_count) {
                summaries
                    .dots
                    .push(dot_positions(&quantiles, config.dot_step, config.smooth));
            }
            if let Some(stats) = box_stats(bin) {
                summaries.boxes.push(stats);
            }
        }
        tracing::debug!(
            bins = bins.len(),
            summarized = summaries.boxes.len(),
            "computed per-bin summaries"
        );
        summaries
    }
}
