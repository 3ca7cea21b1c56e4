use std::sync::Arc;

use somnus_data::{
    config::PipelineConfig,
    curves::{PercentileTier, percentile_curves},
    dataset::Diagnostic,
    estimate::{lookup_exact, lookup_percentile, score_estimate},
    pipeline::{Pipeline, PipelineOutput},
    sample::{SampleRecord, SampleSeed},
    study::{StudyDescriptor, default_studies},
};

fn default_output(seed: u64) -> PipelineOutput {
    Pipeline::new(PipelineConfig::default(), &default_studies())
        .unwrap()
        .run_with_seed(SampleSeed::from(seed))
}

fn outside_count(output: &PipelineOutput) -> usize {
    output
        .diagnostics
        .iter()
        .map(|d| match d {
            Diagnostic::SamplesOutsideDomain { count, .. } => *count,
            Diagnostic::MissingBinResults { .. } | Diagnostic::InvalidSleepTimes { .. } => 0,
        })
        .sum()
}

#[test]
fn default_run_covers_every_bin() {
    let output = default_output(1);
    assert_eq!(output.sample_count, 159_415);
    assert_eq!(output.dataset.len(), 90);

    let starts: Vec<f64> = output.dataset.iter().map(|(start, _)| start).collect();
    assert_eq!(starts.first(), Some(&5.0));
    assert_eq!(starts.last(), Some(&94.0));

    for entry in output.dataset.values() {
        assert_eq!(entry.age_range.end - entry.age_range.start, 1.0);
        assert_eq!(entry.percentile.len(), 91);
        assert_eq!(entry.dot.len(), 20);
        assert_eq!(entry.estimates.len(), 37);
        for pair in entry.percentile.windows(2) {
            assert!(pair[0].q <= pair[1].q);
        }
    }
}

#[test]
fn binned_and_unbinned_samples_add_up() {
    let output = default_output(2);
    let binned: usize = output.dataset.values().map(|e| e.box_plot.count).sum();
    let outside = outside_count(&output);
    // ABCD participants are all younger than five
    assert!(outside >= 3444);
    assert_eq!(binned + outside, output.sample_count);
}

#[test]
fn same_seed_gives_same_dataset() {
    assert_eq!(default_output(7), default_output(7));
}

#[test]
fn lookup_null_cases() {
    let output = default_output(3);
    let dataset = &output.dataset;
    assert_eq!(lookup_percentile(dataset, None, Some(7.0)), None);
    assert_eq!(lookup_percentile(dataset, Some(40.0), None), None);
    assert_eq!(lookup_percentile(dataset, Some(200.0), Some(7.0)), None);
    assert_eq!(lookup_percentile(dataset, Some(2.0), Some(7.0)), None);
    assert_eq!(lookup_exact(dataset, Some(40.0), Some(7.1)), None);
}

#[test]
fn lookup_tracks_sleep_time() {
    let output = default_output(4);
    let dataset = &output.dataset;
    let short = lookup_percentile(dataset, Some(40.0), Some(5.5)).unwrap();
    let long = lookup_percentile(dataset, Some(40.0), Some(9.0)).unwrap();
    assert!(short < long);
    assert!(lookup_percentile(dataset, Some(95.0), Some(7.0)).is_some());

    let score = score_estimate(dataset, 40.2, 7.1, 50.0).unwrap();
    assert!((0.0..=100.0).contains(&score.truth));
    assert_eq!(score.error, (50.0 - score.truth).abs());
}

#[test]
fn sparse_population_yields_sparse_dataset() {
    let config = PipelineConfig {
        age_min: 0.0,
        age_max: 30.0,
        age_step: 10.0,
        ..PipelineConfig::default()
    };
    let studies = [StudyDescriptor::new("test", 1, [0.0, 1.0], 8.0, 1.0)];
    let pipeline = Pipeline::new(config, &studies).unwrap();
    let samples = [5.0, 6.0, 25.0, 26.0]
        .into_iter()
        .map(|age| SampleRecord {
            study_id: Arc::from("test"),
            age,
            sleep_time: 7.0 + age / 100.0,
        })
        .collect();

    let output = pipeline.aggregate(samples);
    assert_eq!(output.dataset.len(), 2);
    assert!(output.dataset.get(10.0).is_none());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(
        output.diagnostics[0],
        Diagnostic::MissingBinResults { start, end, .. } if (start, end) == (10.0, 20.0)
    ));

    assert!(lookup_percentile(&output.dataset, Some(15.0), Some(7.0)).is_none());
    assert!(lookup_percentile(&output.dataset, Some(5.0), Some(7.0)).is_some());

    let curves = percentile_curves(&output.dataset, PercentileTier::Prominent);
    assert!(curves.iter().all(|curve| curve.points.len() == 2));
}

#[test]
fn nan_sleep_time_is_dropped_not_fatal() {
    let pipeline = Pipeline::new(PipelineConfig::default(), &default_studies()).unwrap();
    let samples = [7.0, 8.0, f64::NAN]
        .into_iter()
        .map(|sleep_time| SampleRecord {
            study_id: Arc::from("test"),
            age: 40.0,
            sleep_time,
        })
        .collect();

    let output = pipeline.aggregate(samples);
    let entry = output.dataset.get(40.0).unwrap();
    assert_eq!(entry.box_plot.count, 2);
    assert!(entry.percentile.iter().all(|p| p.q.is_finite()));
    assert!(
        output
            .diagnostics
            .contains(&Diagnostic::InvalidSleepTimes { count: 1 })
    );
}
