use clap::Args;
use somnus_data::estimate::{
    AGE_QUERY_STEP, SLEEP_QUERY_STEP, lookup_exact, lookup_percentile, round_to_step,
};

use crate::util::{PipelineArg, format_percent};

#[derive(Debug, Clone, Args)]
pub(crate) struct LookupArg {
    /// Age in years
    #[arg(long)]
    age: f64,
    /// Sleep time in hours
    #[arg(long)]
    sleep_time: f64,
    #[command(flatten)]
    pipeline: PipelineArg,
}

pub(crate) fn run(arg: &LookupArg) -> anyhow::Result<()> {
    let output = arg.pipeline.run()?;
    let age = round_to_step(arg.age, AGE_QUERY_STEP);
    let sleep_time = round_to_step(arg.sleep_time, SLEEP_QUERY_STEP);

    let nearest = lookup_percentile(&output.dataset, Some(age), Some(sleep_time));
    let exact = lookup_exact(&output.dataset, Some(age), Some(sleep_time));
    tracing::debug!(age, sleep_time, ?nearest, ?exact, "looked up percentile");

    println!("Age {age}, sleep time {sleep_time} h");
    println!("  Nearest percentile: {}", format_percent(nearest));
    println!("  Exact grid match:   {}", format_percent(exact));
    Ok(())
}
