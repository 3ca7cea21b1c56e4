//! Assembly of per-bin summaries into the chart dataset.
//!
//! For every interval of the age ladder the assembler looks up the percentile,
//! dot and box results computed for exactly that interval. When all three are
//! present it derives the bin's estimate entries and stores a
//! [`DatasetEntry`] under the bin's start age. When any is missing the bin is
//! left out and a [`Diagnostic`] is recorded instead, so the dataset may be
//! sparse.

use std::{collections::BTreeMap, fmt};

use ordered_float::OrderedFloat;
use somnus_stats::{boxplot::BoxStats, nearest::nearest_by, quantile::round_key};

use crate::{
    config::AgeLadder,
    summary::{BinSummaries, DotPosition, PercentileEntry},
};

/// Age interval `[start, end)` of a dataset entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRange {
    pub start: f64,
    pub end: f64,
}

/// Nearest percentile for one sleep-time grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateEntry {
    /// Sleep time of the grid point in hours.
    pub sleep_time: f64,
    /// Probability of the percentile whose sleep time is closest to `sleep_time`.
    pub nearest_percentile: Option<f64>,
}

/// Everything the chart needs for one age bin.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub age_range: AgeRange,
    pub box_plot: BoxStats,
    pub dot: Vec<DotPosition>,
    pub percentile: Vec<PercentileEntry>,
    pub estimates: Vec<EstimateEntry>,
}

impl DatasetEntry {
    /// Sleep time at probability `p` of the percentile ladder, if `p` is on it.
    #[must_use]
    pub fn percentile_at(&self, p: f64) -> Option<f64> {
        let p = round_key(p);
        self.percentile.iter().find(|entry| entry.p == p).map(|entry| entry.q)
    }
}

/// Assembled per-bin data keyed by bin start age.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    entries: BTreeMap<OrderedFloat<f64>, DatasetEntry>,
    /// Closed upper edge of the last configured bin.
    age_max: f64,
}

impl Dataset {
    #[must_use]
    pub fn get(&self, start: f64) -> Option<&DatasetEntry> {
        self.entries.get(&OrderedFloat(start))
    }

    /// Entries in ascending age order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &DatasetEntry)> + '_ {
        self.entries.iter().map(|(start, entry)| (start.0, entry))
    }

    pub fn values(&self) -> impl Iterator<Item = &DatasetEntry> + '_ {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn age_max(&self) -> f64 {
        self.age_max
    }

    /// The entry whose `[start, end)` contains `age`.
    ///
    /// An entry whose `end` is the ladder's upper edge also contains that edge.
    /// Returns `None` for NaN, for ages outside every entry, and for ages in a
    /// bin that was skipped during assembly.
    #[must_use]
    pub fn entry_for_age(&self, age: f64) -> Option<&DatasetEntry> {
        if age.is_nan() {
            return None;
        }
        let (_, entry) = self.entries.range(..=OrderedFloat(age)).next_back()?;
        let AgeRange { start, end } = entry.age_range;
        let inside = (start <= age && age < end) || (age == end && end == self.age_max);
        inside.then_some(entry)
    }
}

/// Kind of per-bin result the assembler joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ResultKind {
    #[display("box")]
    Box,
    #[display("dot")]
    Dot,
    #[display("percentile")]
    Percentile,
}

/// Non-fatal condition recorded during a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A bin was left out of the dataset because some results are missing.
    MissingBinResults {
        start: f64,
        end: f64,
        missing: Vec<ResultKind>,
    },
    /// Records were generated outside the age domain and not binned.
    SamplesOutsideDomain { count: usize, min: f64, max: f64 },
    /// Records with a NaN or infinite sleep time were dropped.
    InvalidSleepTimes { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBinResults {
                start,
                end,
                missing,
            } => {
                write!(f, "no matching data found for age range {start} to {end} (missing")?;
                for kind in missing {
                    write!(f, " {kind}")?;
                }
                write!(f, ")")
            }
            Self::SamplesOutsideDomain { count, min, max } => {
                write!(f, "{count} samples outside the age domain {min}..={max}")
            }
            Self::InvalidSleepTimes { count } => {
                write!(f, "{count} samples with a non-finite sleep time were dropped")
            }
        }
    }
}

/// Nearest percentile for every sleep-time grid point.
///
/// Ties go to the lower percentile.
#[must_use]
pub fn estimate_entries(percentiles: &[PercentileEntry], sleep_grid: &[f64]) -> Vec<EstimateEntry> {
    sleep_grid
        .iter()
        .map(|&sleep_time| EstimateEntry {
            sleep_time,
            nearest_percentile: nearest_by(percentiles, sleep_time, |entry| entry.q)
                .map(|entry| entry.p),
        })
        .collect()
}

/// Joins per-bin summaries into a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct DatasetAssembler<'a> {
    ladder: &'a AgeLadder,
    sleep_grid: &'a [f64],
}

impl<'a> DatasetAssembler<'a> {
    #[must_use]
    pub fn new(ladder: &'a AgeLadder, sleep_grid: &'a [f64]) -> Self {
        Self { ladder, sleep_grid }
    }

    /// Builds the dataset and the list of skipped bins.
    #[must_use]
    pub fn assemble(&self, summaries: &BinSummaries) -> (Dataset, Vec<Diagnostic>) {
        let mut entries = BTreeMap::new();
        let mut diagnostics = vec![];

        for (x0, x1) in self.ladder.intervals() {
            let box_plot = summaries.boxes.iter().find(|r| r.matches(x0, x1));
            let dot = summaries.dots.iter().find(|r| r.matches(x0, x1));
            let percentile = summaries.percentiles.iter().find(|r| r.matches(x0, x1));

            let (Some(box_plot), Some(dot), Some(percentile)) = (box_plot, dot, percentile) else {
                let missing = [
                    (ResultKind::Box, box_plot.is_none()),
                    (ResultKind::Dot, dot.is_none()),
                    (ResultKind::Percentile, percentile.is_none()),
                ]
                .into_iter()
                .filter_map(|(kind, is_missing)| is_missing.then_some(kind))
                .collect::<Vec<_>>();
                let diagnostic = Diagnostic::MissingBinResults {
                    start: x0,
                    end: x1,
                    missing,
                };
                tracing::warn!(start = x0, end = x1, "{diagnostic}");
                diagnostics.push(diagnostic);
                continue;
            };

            let entry = DatasetEntry {
                age_range: AgeRange { start: x0, end: x1 },
                box_plot: box_plot.value.clone(),
                dot: dot.value.clone(),
                percentile: percentile.value.clone(),
                estimates: estimate_entries(&percentile.value, self.sleep_grid),
            };
            entries.insert(OrderedFloat(x0), entry);
        }

        tracing::debug!(
            entries = entries.len(),
            skipped = diagnostics.len(),
            "assembled dataset"
        );
        let dataset = Dataset {
            entries,
            age_max: self.ladder.max(),
        };
        (dataset, diagnostics)
    }
}
