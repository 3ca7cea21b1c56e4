//! Pipeline configuration and validation.
//!
//! [`PipelineConfig`] holds the scalar parameters of a pipeline run. Its
//! [`Default`] reproduces the published chart: ages 5 to 95 in one-year bins,
//! sleep times 4 h to 13 h on a quarter-hour grid, 20 quantile dots per bin
//! and the 5th to 95th percentile ladder.
//!
//! Validation happens once, before any sample is drawn. Every problem found
//! here is fatal and reported as a [`ConfigError`].

use somnus_stats::quantile::round_key;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("age ladder needs at least 2 thresholds, got {thresholds}")]
    DegenerateAgeLadder { thresholds: usize },
    #[display("age ladder thresholds must be finite and non-decreasing")]
    UnsortedAgeLadder,
    #[display("{name} step must be a positive finite number, got {step}")]
    InvalidStep { name: &'static str, step: f64 },
    #[display("{name} step {step} divides the range into more than {limit} steps")]
    TooManySteps {
        name: &'static str,
        step: f64,
        limit: usize,
    },
    #[display("{name} range {min}..={max} is invalid")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[display("quantile count must be at least 1")]
    NoQuantiles,
    #[display("study table is empty")]
    EmptyStudyTable,
    #[display("study '{name}' is invalid: {reason}")]
    InvalidStudy { name: String, reason: &'static str },
    #[display("percentile bounds {lower}..={upper} must satisfy 0 < lower <= upper < 100")]
    InvalidPercentileBounds { lower: u32, upper: u32 },
}

/// Scalar parameters of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Lower edge of the age domain in years.
    pub age_min: f64,
    /// Upper edge of the age domain in years (inclusive).
    pub age_max: f64,
    /// Width of one age bin in years.
    pub age_step: f64,
    /// Lowest sleep time of the estimate grid in hours.
    pub sleep_min: f64,
    /// Highest sleep time of the estimate grid in hours.
    pub sleep_max: f64,
    /// Spacing of the estimate grid in hours.
    pub sleep_step: f64,
    /// Number of quantile dots per bin.
    pub quantile_count: usize,
    /// Dot bin width in hours.
    pub dot_step: f64,
    /// Whether dot binning rebalances adjacent bins.
    pub smooth: bool,
    /// Lowest whole percent of the percentile ladder.
    pub percentile_lower: u32,
    /// Highest whole percent of the percentile ladder.
    pub percentile_upper: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            age_min: 5.0,
            age_max: 95.0,
            age_step: 1.0,
            sleep_min: 4.0,
            sleep_max: 13.0,
            sleep_step: 0.25,
            quantile_count: 20,
            // 540 px column split into 20 dots, expressed in hours
            dot_step: 540.0 / 20.0 / 60.0,
            smooth: false,
            percentile_lower: 5,
            percentile_upper: 95,
        }
    }
}

impl PipelineConfig {
    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.age_ladder()?;
        self.sleep_grid()?;
        check_step("dot", self.dot_step)?;
        if self.quantile_count == 0 {
            return Err(ConfigError::NoQuantiles);
        }
        let (lower, upper) = (self.percentile_lower, self.percentile_upper);
        if lower == 0 || lower > upper || upper >= 100 {
            return Err(ConfigError::InvalidPercentileBounds { lower, upper });
        }
        Ok(())
    }

    /// Builds the age threshold ladder `age_min, age_min + age_step, ..., age_max`.
    pub fn age_ladder(&self) -> Result<AgeLadder, ConfigError> {
        AgeLadder::from_range(self.age_min, self.age_max, self.age_step)
    }

    /// Builds the sleep-time grid used for estimate entries.
    pub fn sleep_grid(&self) -> Result<Vec<f64>, ConfigError> {
        check_range("sleep", self.sleep_min, self.sleep_max)?;
        check_step("sleep", self.sleep_step)?;
        stepped("sleep", self.sleep_min, self.sleep_max, self.sleep_step)
    }
}

/// Ordered age thresholds delimiting the age bins.
///
/// Bin `i` covers `[thresholds[i], thresholds[i + 1])`, except the last bin,
/// which also includes its upper edge. Repeated thresholds are allowed; the
/// zero-width intervals they create are never used as bins.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeLadder {
    thresholds: Vec<f64>,
}

impl AgeLadder {
    pub fn new(thresholds: Vec<f64>) -> Result<Self, ConfigError> {
        if thresholds.len() < 2 {
            return Err(ConfigError::DegenerateAgeLadder {
                thresholds: thresholds.len(),
            });
        }
        if !thresholds.iter().all(|t| t.is_finite()) || !thresholds.is_sorted() {
            return Err(ConfigError::UnsortedAgeLadder);
        }
        Ok(Self { thresholds })
    }

    /// Evenly spaced thresholds from `min` to `max`.
    ///
    /// If `max - min` is not a multiple of `step`, `max` is appended so the
    /// ladder always spans the whole domain.
    pub fn from_range(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        check_range("age", min, max)?;
        check_step("age", step)?;
        let mut thresholds = stepped("age", min, max, step)?;
        if thresholds.last().is_some_and(|&last| last < max) {
            thresholds.push(max);
        }
        Self::new(thresholds)
    }

    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.thresholds[0]
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.thresholds[self.thresholds.len() - 1]
    }

    /// Non-degenerate `(start, end)` intervals in ascending order.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.thresholds
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .filter(|(start, end)| start < end)
    }

    /// Index into [`Self::intervals`] of the bin containing `age`.
    ///
    /// Returns `None` for ages outside `[min, max]` and for NaN.
    #[must_use]
    pub fn bin_index(&self, age: f64) -> Option<usize> {
        if !(self.min()..=self.max()).contains(&age) {
            return None;
        }
        let threshold_index = if age >= self.max() {
            // the closed upper edge belongs to the last non-degenerate interval
            self.thresholds.windows(2).rposition(|pair| pair[0] < pair[1])?
        } else {
            self.thresholds.partition_point(|&t| t <= age) - 1
        };
        // count the non-degenerate intervals before the containing one
        Some(
            self.thresholds[..=threshold_index]
                .windows(2)
                .filter(|pair| pair[0] < pair[1])
                .count(),
        )
    }
}

fn check_step(name: &'static str, step: f64) -> Result<(), ConfigError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidStep { name, step })
    }
}

fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}

/// Upper bound on the number of steps a range may be divided into.
pub const MAX_STEPS: usize = 100_000;

/// `min + i * step` for every `i` that stays within `max`, rounded to key precision.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn stepped(name: &'static str, min: f64, max: f64, step: f64) -> Result<Vec<f64>, ConfigError> {
    // tolerate float error in (max - min) / step landing just below an integer
    let count = ((max - min) / step + 1e-9).floor();
    if count > MAX_STEPS as f64 {
        return Err(ConfigError::TooManySteps {
            name,
            step,
            limit: MAX_STEPS,
        });
    }
    let count = count as usize;
    Ok((0..=count)
        .map(|i| round_key(min + i as f64 * step))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        config.validate().unwrap();
        let ladder = config.age_ladder().unwrap();
        assert_eq!(ladder.thresholds().len(), 91);
        assert_eq!(ladder.intervals().count(), 90);
        assert_eq!(ladder.min(), 5.0);
        assert_eq!(ladder.max(), 95.0);
        let grid = config.sleep_grid().unwrap();
        assert_eq!(grid.len(), 37);
        assert_eq!(grid[0], 4.0);
        assert_eq!(grid[36], 13.0);
        assert_eq!(grid[1], 4.25);
    }

    #[test]
    fn test_degenerate_ladder() {
        assert_eq!(
            AgeLadder::new(vec![5.0]),
            Err(ConfigError::DegenerateAgeLadder { thresholds: 1 })
        );
        assert_eq!(
            AgeLadder::from_range(5.0, 5.0, 1.0),
            Err(ConfigError::DegenerateAgeLadder { thresholds: 1 })
        );
        assert_eq!(
            AgeLadder::new(vec![5.0, 4.0]),
            Err(ConfigError::UnsortedAgeLadder)
        );
        assert_eq!(
            AgeLadder::new(vec![5.0, f64::NAN]),
            Err(ConfigError::UnsortedAgeLadder)
        );
    }

    #[test]
    fn test_ladder_appends_max() {
        let ladder = AgeLadder::from_range(0.0, 10.0, 4.0).unwrap();
        assert_eq!(ladder.thresholds(), &[0.0, 4.0, 8.0, 10.0]);
    }

    #[test]
    fn test_intervals_skip_repeated_thresholds() {
        let ladder = AgeLadder::new(vec![0.0, 1.0, 1.0, 2.0]).unwrap();
        assert_eq!(
            ladder.intervals().collect::<Vec<_>>(),
            vec![(0.0, 1.0), (1.0, 2.0)]
        );
    }

    #[test]
    fn test_bin_index_half_open_with_closed_last_bin() {
        let ladder = AgeLadder::new(vec![0.0, 1.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(ladder.bin_index(0.0), Some(0));
        assert_eq!(ladder.bin_index(0.999), Some(0));
        assert_eq!(ladder.bin_index(1.0), Some(1));
        assert_eq!(ladder.bin_index(2.0), Some(2));
        assert_eq!(ladder.bin_index(3.0), Some(2));
        assert_eq!(ladder.bin_index(-0.1), None);
        assert_eq!(ladder.bin_index(3.1), None);
        assert_eq!(ladder.bin_index(f64::NAN), None);
    }

    #[test]
    fn test_closed_edge_skips_trailing_repeat() {
        let ladder = AgeLadder::new(vec![0.0, 1.0, 2.0, 2.0]).unwrap();
        assert_eq!(ladder.bin_index(2.0), Some(1));
    }

    #[test]
    fn test_invalid_parameters() {
        let config = PipelineConfig {
            quantile_count: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoQuantiles));

        let config = PipelineConfig {
            dot_step: 0.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStep { name: "dot", .. })
        ));

        let config = PipelineConfig {
            percentile_lower: 50,
            percentile_upper: 40,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPercentileBounds { .. })
        ));

        let config = PipelineConfig {
            sleep_min: 13.0,
            sleep_max: 4.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "sleep", .. })
        ));
    }

    #[test]
    fn test_tiny_step_is_rejected() {
        let config = PipelineConfig {
            age_step: 1e-300,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManySteps { name: "age", .. })
        ));

        let config = PipelineConfig {
            sleep_step: 1e-9,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.sleep_grid(),
            Err(ConfigError::TooManySteps { name: "sleep", .. })
        ));

        let ladder = AgeLadder::from_range(0.0, 100.0, 0.01).unwrap();
        assert_eq!(ladder.thresholds().len(), 10_001);
    }
}
