//! Synthetic sample generation.
//!
//! Each [`StudyDescriptor`] is expanded into `sample_count` records whose sleep
//! time is drawn from `Normal(mean, sd)` and whose age is drawn uniformly from
//! the study's age extent.
//!
//! Generation is the only non-deterministic step of the pipeline. The random
//! source is injected: pass any [`Rng`] to [`SampleGenerator::generate`], or a
//! [`SampleSeed`] to [`SampleGenerator::generate_with_seed`] for reproducible
//! output.
//!
//! ```
//! use somnus_data::{sample::{SampleGenerator, SampleSeed}, study::default_studies};
//!
//! let generator = SampleGenerator::new(&default_studies()).unwrap();
//! let a = generator.generate_with_seed(SampleSeed::from(7_u64));
//! let b = generator.generate_with_seed(SampleSeed::from(7_u64));
//! assert_eq!(a, b);
//! ```

use std::{fmt, sync::Arc};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_distr::Normal;
use rand_pcg::Pcg32;

use crate::{config::ConfigError, study::StudyDescriptor};

/// One simulated participant.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// Name of the study the record was drawn from.
    pub study_id: Arc<str>,
    /// Age in years.
    pub age: f64,
    /// Sleep time in hours.
    pub sleep_time: f64,
}

/// Seed for deterministic sample generation.
///
/// A 128-bit seed for the PCG generator. The same seed and study table always
/// produce the same records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSeed([u8; 16]);

impl From<u64> for SampleSeed {
    fn from(value: u64) -> Self {
        let mut seed = [0; 16];
        Pcg32::seed_from_u64(value).fill(&mut seed);
        Self(seed)
    }
}

impl From<[u8; 16]> for SampleSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SampleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Allows generating random `SampleSeed` values with `rng.random()`.
impl Distribution<SampleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SampleSeed(seed)
    }
}

#[derive(Debug, Clone)]
struct StudySampler {
    name: Arc<str>,
    sample_count: usize,
    age_lo: f64,
    age_hi: f64,
    sleep: Normal<f64>,
}

/// Draws sample records for a fixed study table.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    studies: Vec<StudySampler>,
}

impl SampleGenerator {
    /// Validates the study table and prepares the sleep-time distributions.
    pub fn new(studies: &[StudyDescriptor]) -> Result<Self, ConfigError> {
        if studies.is_empty() {
            return Err(ConfigError::EmptyStudyTable);
        }
        let studies = studies
            .iter()
            .map(|study| {
                study.validate()?;
                let sleep =
                    Normal::new(study.mean, study.sd).map_err(|_| ConfigError::InvalidStudy {
                        name: study.name.clone(),
                        reason: "sleep distribution parameters rejected",
                    })?;
                Ok(StudySampler {
                    name: Arc::from(study.name.as_str()),
                    sample_count: study.sample_count,
                    age_lo: study.age_extent[0],
                    age_hi: study.age_extent[1],
                    sleep,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { studies })
    }

    /// Total number of records one call to [`Self::generate`] produces.
    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.studies.iter().map(|s| s.sample_count).sum()
    }

    /// Draws all records, study by study, from `rng`.
    pub fn generate<R>(&self, rng: &mut R) -> Vec<SampleRecord>
    where
        R: Rng + ?Sized,
    {
        let mut records = Vec::with_capacity(self.total_samples());
        for study in &self.studies {
            for _ in 0..study.sample_count {
                let sleep_time = study.sleep.sample(rng);
                let age = rng.random_range(study.age_lo..study.age_hi);
                records.push(SampleRecord {
                    study_id: Arc::clone(&study.name),
                    age,
                    sleep_time,
                });
            }
        }
        records
    }

    /// Like [`Self::generate`], but with a PCG generator seeded from `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: SampleSeed) -> Vec<SampleRecord> {
        let mut rng = Pcg32::from_seed(seed.0);
        self.generate(&mut rng)
    }
}
