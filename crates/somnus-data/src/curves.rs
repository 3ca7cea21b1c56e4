//! Percentile curves across age.
//!
//! Regroups the per-bin percentile ladders of a [`Dataset`] by whole percent,
//! giving one `(age, sleep time)` polyline per percentile.

use std::collections::BTreeMap;

use crate::dataset::Dataset;

/// Percentiles drawn with emphasis.
pub const PROMINENT_PERCENTS: [u32; 7] = [5, 10, 25, 50, 75, 90, 95];

/// Which percentile curves to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentileTier {
    /// [`PROMINENT_PERCENTS`] only.
    #[default]
    Prominent,
    /// Multiples of five.
    EveryFifth,
    /// Every percentile of the ladder.
    All,
}

impl PercentileTier {
    #[must_use]
    pub fn includes(self, percent: u32) -> bool {
        match self {
            Self::Prominent => PROMINENT_PERCENTS.contains(&percent),
            Self::EveryFifth => percent % 5 == 0,
            Self::All => true,
        }
    }
}

/// Sleep time at one percentile for every assembled bin.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileCurve {
    pub percent: u32,
    /// `(bin start age, sleep time)` in ascending age order.
    pub points: Vec<(f64, f64)>,
}

/// Curves for every percentile selected by `tier`, in ascending percent order.
#[must_use]
pub fn percentile_curves(dataset: &Dataset, tier: PercentileTier) -> Vec<PercentileCurve> {
    let mut curves = BTreeMap::<u32, Vec<(f64, f64)>>::new();
    for (start, entry) in dataset.iter() {
        for point in &entry.percentile {
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let percent = (point.p * 100.0).round() as u32;
            if tier.includes(percent) {
                curves.entry(percent).or_default().push((start, point.q));
            }
        }
    }
    curves
        .into_iter()
        .map(|(percent, points)| PercentileCurve { percent, points })
        .collect()
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

    fn dataset() -> Dataset {
        let ladder = AgeLadder::new(vec![0.0, 10.0, 20.0, 30.0]).unwrap();
        let samples = [(5.0, 9.0), (15.0, 8.0), (25.0, 7.0)]
            .into_iter()
            .flat_map(|(age, center)| {
                (-10..=10).map(move |i| SampleRecord {
                    study_id: Arc::from("test"),
                    age,
                    sleep_time: center + f64::from(i) * 0.1,
                })
            });
        let binning = AgeBinning::new(samples, &ladder);
        let config = PipelineConfig::default();
        let summaries = BinSummaries::compute(&binning.bins, &config);
        DatasetAssembler::new(&ladder, &[7.0])
            .assemble(&summaries)
            .0
    }

    #[test]
    fn test_tier_membership() {
        assert!(PercentileTier::Prominent.includes(25));
        assert!(!PercentileTier::Prominent.includes(30));
        assert!(PercentileTier::EveryFifth.includes(30));
        assert!(!PercentileTier::EveryFifth.includes(31));
        assert!(PercentileTier::All.includes(31));
    }

    #[test]
    fn test_curve_counts_per_tier() {
        let dataset = dataset();
        assert_eq!(percentile_curves(&dataset, PercentileTier::Prominent).len(), 7);
        assert_eq!(percentile_curves(&dataset, PercentileTier::EveryFifth).len(), 19);
        assert_eq!(percentile_curves(&dataset, PercentileTier::All).len(), 91);
    }

    #[test]
    fn test_median_curve_follows_bins() {
        let curves = percentile_curves(&dataset(), PercentileTier::Prominent);
        let median = curves.iter().find(|c| c.percent == 50).unwrap();
        assert_eq!(median.points.len(), 3);
        let ages: Vec<f64> = median.points.iter().map(|&(age, _)| age).collect();
        assert_eq!(ages, vec![0.0, 10.0, 20.0]);
        approx::assert_relative_eq!(median.points[0].1, 9.0);
        approx::assert_relative_eq!(median.points[2].1, 7.0);
    }
}
