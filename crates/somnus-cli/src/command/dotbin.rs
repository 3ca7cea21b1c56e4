use clap::Args;
use somnus_data::config::PipelineConfig;
use somnus_stats::dotbin::dotbin;

#[derive(Debug, Clone, Args)]
pub(crate) struct DotbinArg {
    /// Bin width
    #[arg(long, default_value_t = PipelineConfig::default().dot_step)]
    step: f64,
    /// Rebalance adjacent bins
    #[arg(long)]
    smooth: bool,
    /// Values to bin
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
}

pub(crate) fn run(arg: &DotbinArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.step.is_finite() && arg.step > 0.0,
        "Step must be a positive number, got {}",
        arg.step
    );
    anyhow::ensure!(
        arg.values.iter().all(|v| v.is_finite()),
        "Values must be finite numbers"
    );

    let mut values = arg.values.clone();
    values.sort_by(f64::total_cmp);
    let positions = dotbin(&values, arg.step, arg.smooth);

    println!("  {:>10} {:>10}", "Value", "Position");
    println!("  {}", "-".repeat(21));
    for (value, position) in values.iter().zip(&positions) {
        println!("  {value:>10.3} {position:>10.3}");
    }
    Ok(())
}
