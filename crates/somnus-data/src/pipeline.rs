//! End-to-end pipeline: generate, bin, summarize, assemble.
//!
//! [`Pipeline::new`] validates the configuration and the study table once.
//! After that a run cannot fail; problems with individual bins are reported as
//! [`Diagnostic`]s next to the (possibly sparse) [`Dataset`].

use rand::Rng;

use crate::{
    binning::AgeBinning,
    config::{AgeLadder, ConfigError, PipelineConfig},
    dataset::{Dataset, DatasetAssembler, Diagnostic},
    sample::{SampleGenerator, SampleRecord, SampleSeed},
    study::StudyDescriptor,
    summary::BinSummaries,
};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub dataset: Dataset,
    /// Skipped bins, then unbinned and dropped samples.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of records fed into binning.
    pub sample_count: usize,
}

/// A validated pipeline ready to run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    ladder: AgeLadder,
    sleep_grid: Vec<f64>,
    generator: SampleGenerator,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, studies: &[StudyDescriptor]) -> Result<Self, ConfigError> {
        config.validate()?;
        let ladder = config.age_ladder()?;
        let sleep_grid = config.sleep_grid()?;
        let generator = SampleGenerator::new(studies)?;
        Ok(Self {
            config,
            ladder,
            sleep_grid,
            generator,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn ladder(&self) -> &AgeLadder {
        &self.ladder
    }

    #[must_use]
    pub fn sleep_grid(&self) -> &[f64] {
        &self.sleep_grid
    }

    /// Generates samples from `rng` and aggregates them.
    pub fn run<R>(&self, rng: &mut R) -> PipelineOutput
    where
        R: Rng + ?Sized,
    {
        self.aggregate(self.generator.generate(rng))
    }

    /// Like [`Self::run`], with reproducible sample generation.
    #[must_use]
    pub fn run_with_seed(&self, seed: SampleSeed) -> PipelineOutput {
        tracing::debug!(%seed, "running pipeline");
        self.aggregate(self.generator.generate_with_seed(seed))
    }

    /// Bins, summarizes and assembles an existing sample population.
    #[must_use]
    pub fn aggregate(&self, samples: Vec<SampleRecord>) -> PipelineOutput {
        let sample_count = samples.len();
        let binning = AgeBinning::new(samples, &self.ladder);
        let summaries = BinSummaries::compute(&binning.bins, &self.config);
        let (dataset, mut diagnostics) =
            DatasetAssembler::new(&self.ladder, &self.sleep_grid).assemble(&summaries);

        if binning.outside_domain > 0 {
            let diagnostic = Diagnostic::SamplesOutsideDomain {
                count: binning.outside_domain,
                min: self.ladder.min(),
                max: self.ladder.max(),
            };
            tracing::warn!("{diagnostic}");
            diagnostics.push(diagnostic);
        }
        if binning.invalid_sleep_time > 0 {
            let diagnostic = Diagnostic::InvalidSleepTimes {
                count: binning.invalid_sleep_time,
            };
            tracing::warn!("{diagnostic}");
            diagnostics.push(diagnostic);
        }

        tracing::debug!(
            sample_count,
            bins = binning.bins.len(),
            entries = dataset.len(),
            diagnostics = diagnostics.len(),
            "pipeline finished"
        );
        PipelineOutput {
            dataset,
            diagnostics,
            sample_count,
        }
    }
}
