//! Study descriptors for synthetic sample generation.

use crate::config::ConfigError;

/// Summary statistics of one published sleep-duration study.
///
/// Samples are drawn with sleep time `~ Normal(mean, sd)` and age uniform over
/// `age_extent`.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyDescriptor {
    pub name: String,
    /// Number of participants to simulate.
    pub sample_count: usize,
    /// Age range `[lo, hi)` of the participants in years.
    pub age_extent: [f64; 2],
    /// Mean sleep time in hours.
    pub mean: f64,
    /// Standard deviation of sleep time in hours.
    pub sd: f64,
}

impl StudyDescriptor {
    #[must_use]
    pub fn new(name: &str, sample_count: usize, age_extent: [f64; 2], mean: f64, sd: f64) -> Self {
        Self {
            name: name.to_owned(),
            sample_count,
            age_extent,
            mean,
            sd,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidStudy {
            name: self.name.clone(),
            reason,
        };
        let [lo, hi] = self.age_extent;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(invalid("age extent must be finite with lo < hi"));
        }
        if !self.mean.is_finite() {
            return Err(invalid("mean must be finite"));
        }
        if !(self.sd.is_finite() && self.sd >= 0.0) {
            return Err(invalid("sd must be finite and non-negative"));
        }
        Ok(())
    }
}

/// The Dutch cohort studies shown in the chart.
#[must_use]
pub fn default_studies() -> Vec<StudyDescriptor> {
    vec![
        StudyDescriptor::new("ABCD", 3444, [0.99, 3.39], 10.6, 0.7),
        StudyDescriptor::new("CheckKid", 10362, [3.97, 13.2], 11.2, 0.6),
        StudyDescriptor::new("EPHE", 127, [6.0, 9.0], 10.1, 1.0),
        StudyDescriptor::new("CSHQ", 1504, [2.16, 13.7], 10.6, 0.9),
        StudyDescriptor::new("ENERGY", 396, [10.0, 14.0], 9.6, 0.9),
        StudyDescriptor::new("Dewald", 954, [11.0, 23.5], 7.9, 1.2),
        StudyDescriptor::new("AGHLS", 340, [41.0, 45.0], 7.7, 1.1),
        StudyDescriptor::new("MORGEN", 22847, [20.1, 65.8], 7.3, 0.9),
        StudyDescriptor::new("Lifelines", 63446, [20.0, 68.0], 7.1, 0.9),
        StudyDescriptor::new("HELIUS", 23563, [18.0, 73.0], 6.9, 1.3),
        StudyDescriptor::new("NESDA Controls", 601, [20.0, 67.0], 7.4, 0.9),
        StudyDescriptor::new("AMIGO", 14670, [23.0, 80.0], 7.0, 1.0),
        StudyDescriptor::new("NEO", 5808, [44.0, 66.0], 6.9, 1.1),
        StudyDescriptor::new("Rotterdam Study", 9818, [45.5, 98.9], 6.8, 0.9),
        StudyDescriptor::new("LASA", 1535, [60.0, 100.0], 7.5, 1.3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_studies_are_valid() {
        let studies = default_studies();
        assert_eq!(studies.len(), 15);
        for study in &studies {
            study.validate().unwrap();
        }
        let total: usize = studies.iter().map(|s| s.sample_count).sum();
        assert_eq!(total, 159_415);
    }

    #[test]
    fn test_invalid_study() {
        let study = StudyDescriptor::new("flat", 10, [5.0, 5.0], 7.0, 1.0);
        assert!(matches!(
            study.validate(),
            Err(ConfigError::InvalidStudy { name, .. }) if name == "flat"
        ));
        let study = StudyDescriptor::new("negative", 10, [5.0, 6.0], 7.0, -1.0);
        assert!(study.validate().is_err());
    }
}
