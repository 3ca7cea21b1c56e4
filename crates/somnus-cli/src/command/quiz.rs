use anyhow::Context as _;
use clap::Args;
use somnus_data::{estimate::score_estimate, guideline::guideline_for};

use crate::util::PipelineArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct QuizArg {
    /// Age in years
    #[arg(long)]
    age: f64,
    /// Sleep time in hours
    #[arg(long)]
    sleep_time: f64,
    /// Guessed percentile (0 to 100)
    #[arg(long)]
    guess: f64,
    #[command(flatten)]
    pipeline: PipelineArg,
}

pub(crate) fn run(arg: &QuizArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=100.0).contains(&arg.guess),
        "Guess must be between 0 and 100, got {}",
        arg.guess
    );
    let output = arg.pipeline.run()?;
    let score = score_estimate(&output.dataset, arg.age, arg.sleep_time, arg.guess)
        .with_context(|| {
            format!(
                "No estimate for age {} and sleep time {} h",
                arg.age, arg.sleep_time
            )
        })?;

    println!("Your guess:  P{:.0}", score.guess);
    println!("Actual:      P{:.0}", score.truth);
    println!("Off by:      {:.0} percentile points", score.error);
    if let Some(guideline) = guideline_for(arg.age) {
        println!("Guideline:   {}", guideline.classify(arg.sleep_time));
    }
    Ok(())
}
