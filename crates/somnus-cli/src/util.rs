use anyhow::Context as _;
use rand::Rng as _;
use somnus_data::{
    config::PipelineConfig,
    pipeline::{Pipeline, PipelineOutput},
    sample::SampleSeed,
    study::default_studies,
};

/// Pipeline options shared by the dataset commands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PipelineArg {
    /// Seed for sample generation (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of quantile dots per age bin
    #[arg(long, default_value_t = PipelineConfig::default().quantile_count)]
    quantiles: usize,
    /// Dot bin width in hours
    #[arg(long, default_value_t = PipelineConfig::default().dot_step)]
    dot_step: f64,
    /// Rebalance adjacent dot bins
    #[arg(long)]
    smooth: bool,
    /// Width of one age bin in years
    #[arg(long, default_value_t = PipelineConfig::default().age_step)]
    age_step: f64,
}

impl PipelineArg {
    pub(crate) fn config(&self) -> PipelineConfig {
        PipelineConfig {
            quantile_count: self.quantiles,
            dot_step: self.dot_step,
            smooth: self.smooth,
            age_step: self.age_step,
            ..PipelineConfig::default()
        }
    }

    /// Generates samples and builds the dataset.
    pub(crate) fn run(&self) -> anyhow::Result<PipelineOutput> {
        let studies = default_studies();
        let pipeline =
            Pipeline::new(self.config(), &studies).context("Invalid pipeline configuration")?;
        let seed = self
            .seed
            .map_or_else(|| rand::rng().random(), SampleSeed::from);
        tracing::info!(%seed, studies = studies.len(), "generating samples");
        Ok(pipeline.run_with_seed(seed))
    }
}

pub(crate) fn format_percent(p: Option<f64>) -> String {
    p.map_or("N/A".to_string(), |p| format!("P{:.0}", p * 100.0))
}
