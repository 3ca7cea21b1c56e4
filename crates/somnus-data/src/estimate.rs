//! Percentile lookups for the "guess your percentile" quiz.
//!
//! Queries come from pointer positions and may be absent; every function here
//! answers `None` instead of failing when an input is missing, when the age
//! falls outside the dataset, or when no estimate is available.

use somnus_stats::{nearest::nearest_by, quantile::round_key};

use crate::dataset::{Dataset, DatasetEntry};

/// Age snapping step for pointer queries, in years.
pub const AGE_QUERY_STEP: f64 = 1.0;
/// Sleep-time snapping step for pointer queries, in hours.
pub const SLEEP_QUERY_STEP: f64 = 0.25;

/// Rounds `value` to the nearest multiple of `step`.
#[must_use]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    round_key((value / step).round() * step)
}

impl DatasetEntry {
    /// Nearest percentile for the estimate entry closest to `sleep_time`.
    ///
    /// Ties go to the entry that comes first in the estimate list.
    #[must_use]
    pub fn nearest_percentile(&self, sleep_time: f64) -> Option<f64> {
        nearest_by(&self.estimates, sleep_time, |entry| entry.sleep_time)?.nearest_percentile
    }

    /// Nearest percentile for the estimate entry whose sleep time equals
    /// `sleep_time` exactly.
    #[must_use]
    pub fn exact_percentile(&self, sleep_time: f64) -> Option<f64> {
        self.estimates
            .iter()
            .find(|entry| entry.sleep_time == sleep_time)?
            .nearest_percentile
    }
}

/// Looks up the percentile of `sleep_time` among people of age `age`.
///
/// Returns the probability (`0.05` for the 5th percentile) of the bin's
/// estimate entry closest to `sleep_time`.
#[must_use]
pub fn lookup_percentile(
    dataset: &Dataset,
    age: Option<f64>,
    sleep_time: Option<f64>,
) -> Option<f64> {
    let (age, sleep_time) = (age?, sleep_time?);
    if sleep_time.is_nan() {
        return None;
    }
    dataset.entry_for_age(age)?.nearest_percentile(sleep_time)
}

/// Like [`lookup_percentile`], but only answers for sleep times that are
/// exactly on the estimate grid.
#[must_use]
pub fn lookup_exact(dataset: &Dataset, age: Option<f64>, sleep_time: Option<f64>) -> Option<f64> {
    let (age, sleep_time) = (age?, sleep_time?);
    dataset.entry_for_age(age)?.exact_percentile(sleep_time)
}

/// Comparison of a guessed percentile with the looked-up one.
///
/// All values are in percentile points (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateScore {
    pub guess: f64,
    pub truth: f64,
    /// `|guess - truth|`.
    pub error: f64,
}

/// Scores a guessed percentile for a person of `age` sleeping `sleep_time` hours.
///
/// The query is snapped to [`AGE_QUERY_STEP`] and [`SLEEP_QUERY_STEP`] first.
#[must_use]
pub fn score_estimate(
    dataset: &Dataset,
    age: f64,
    sleep_time: f64,
    guess_percent: f64,
) -> Option<EstimateScore> {
    let age = round_to_step(age, AGE_QUERY_STEP);
    let sleep_time = round_to_step(sleep_time, SLEEP_QUERY_STEP);
    let truth = round_key(lookup_percentile(dataset, Some(age), Some(sleep_time))? * 100.0);
    Some(EstimateScore {
        guess: guess_percent,
        truth,
        error: (guess_percent - truth).abs(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        binning::AgeBinning,
        config::{AgeLadder, PipelineConfig},
        dataset::DatasetAssembler,
        sample::SampleRecord,
        summary::BinSummaries,
    };

    /// Two bins, `[0, 10)` and `[10, 20]`, each with sleep times 5.0, 5.1, ..., 9.0.
    fn dataset() -> Dataset {
        let ladder = AgeLadder::new(vec![0.0, 10.0, 20.0]).unwrap();
        let samples = [5.0, 15.0].into_iter().flat_map(|age| {
            (0..=40).map(move |i| SampleRecord {
                study_id: Arc::from("test"),
                age,
                sleep_time: 5.0 + f64::from(i) * 0.1,
            })
        });
        let binning = AgeBinning::new(samples, &ladder);
        let config = PipelineConfig::default();
        let summaries = BinSummaries::compute(&binning.bins, &config);
        let grid = config.sleep_grid().unwrap();
        DatasetAssembler::new(&ladder, &grid).assemble(&summaries).0
    }

    #[test]
    fn test_missing_inputs_return_none() {
        let dataset = dataset();
        assert_eq!(lookup_percentile(&dataset, None, Some(7.0)), None);
        assert_eq!(lookup_percentile(&dataset, Some(5.0), None), None);
        assert_eq!(lookup_percentile(&dataset, Some(f64::NAN), Some(7.0)), None);
        assert_eq!(lookup_percentile(&dataset, Some(5.0), Some(f64::NAN)), None);
    }

    #[test]
    fn test_age_outside_bins_returns_none() {
        let dataset = dataset();
        assert_eq!(lookup_percentile(&dataset, Some(200.0), Some(7.0)), None);
        assert_eq!(lookup_percentile(&dataset, Some(-3.0), Some(7.0)), None);
    }

    #[test]
    fn test_lookup_median() {
        let dataset = dataset();
        assert_eq!(lookup_percentile(&dataset, Some(5.0), Some(7.0)), Some(0.5));
        assert_eq!(lookup_percentile(&dataset, Some(20.0), Some(7.0)), Some(0.5));
        // 7.1 is not on the grid; the nearest grid point is 7.0
        assert_eq!(lookup_percentile(&dataset, Some(5.0), Some(7.1)), Some(0.5));
    }

    #[test]
    fn test_lookup_clamps_to_ladder_ends() {
        let dataset = dataset();
        assert_eq!(lookup_percentile(&dataset, Some(5.0), Some(4.0)), Some(0.05));
        assert_eq!(lookup_percentile(&dataset, Some(5.0), Some(13.0)), Some(0.95));
    }

    #[test]
    fn test_exact_lookup_requires_grid_value() {
        let dataset = dataset();
        assert_eq!(lookup_exact(&dataset, Some(5.0), Some(7.0)), Some(0.5));
        assert_eq!(lookup_exact(&dataset, Some(5.0), Some(7.1)), None);
        assert_eq!(lookup_exact(&dataset, None, Some(7.0)), None);
    }

    #[test]
    fn test_nearest_tie_uses_earlier_entry() {
        let dataset = dataset();
        let entry = dataset.get(0.0).unwrap();
        // 7.125 is halfway between grid points 7.0 and 7.25
        assert_eq!(
            entry.nearest_percentile(7.125),
            entry.exact_percentile(7.0)
        );
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(7.13, 0.25), 7.25);
        assert_eq!(round_to_step(7.12, 0.25), 7.0);
        assert_eq!(round_to_step(42.6, 1.0), 43.0);
    }

    #[test]
    fn test_score_estimate() {
        let dataset = dataset();
        let score = score_estimate(&dataset, 4.6, 7.05, 40.0).unwrap();
        assert_eq!(score.truth, 50.0);
        assert_eq!(score.error, 10.0);
        assert!(score_estimate(&dataset, 99.0, 7.0, 40.0).is_none());
    }
}
