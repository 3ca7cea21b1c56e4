use anyhow::Context as _;
use clap::Args;
use somnus_data::{curves::PROMINENT_PERCENTS, guideline::guideline_for};

use crate::util::PipelineArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct BinArg {
    /// Age in years
    #[arg(long)]
    age: f64,
    #[command(flatten)]
    pipeline: PipelineArg,
}

pub(crate) fn run(arg: &BinArg) -> anyhow::Result<()> {
    let output = arg.pipeline.run()?;
    let entry = output
        .dataset
        .entry_for_age(arg.age)
        .with_context(|| format!("No data for age {}", arg.age))?;
    let range = entry.age_range;
    let stats = &entry.box_plot;

    println!("Age {} to {} ({} samples)", range.start, range.end, stats.count);
    println!("==========================================\n");

    println!("Percentiles:");
    for percent in PROMINENT_PERCENTS {
        let p = f64::from(percent) / 100.0;
        if let Some(q) = entry.percentile_at(p) {
            println!("  P{percent:<3} {q:>6.2} h");
        }
    }
    println!();

    println!("Box plot:");
    let [q1, q2, q3] = stats.quartiles;
    println!("  Quartiles: {q1:.2} / {q2:.2} / {q3:.2} h (IQR {:.2})", stats.iqr());
    println!("  Fence:     {:.2} .. {:.2} h", stats.range[0], stats.range[1]);
    println!("  Whiskers:  {:.2} .. {:.2} h", stats.whiskers[0], stats.whiskers[1]);
    println!("  Outliers:  {}", stats.outliers.len());
    println!();

    println!("Dots:");
    println!("  {:>6} {:>8} {:>8}", "p", "q", "x");
    for dot in &entry.dot {
        println!("  {:>6.3} {:>8.3} {:>8.3}", dot.p, dot.q, dot.x);
    }
    println!();

    match guideline_for(arg.age) {
        Some(guideline) => {
            let [rec_lo, rec_hi] = guideline.recommended;
            let [acc_lo, acc_hi] = guideline.acceptable;
            println!(
                "Guideline ({}-{} years): recommended {rec_lo}-{rec_hi} h, acceptable {acc_lo}-{acc_hi} h",
                guideline.age_start, guideline.age_end
            );
            println!("  Median sleep is {}", guideline.classify(q2));
        }
        None => println!("No sleep guideline for age {}", arg.age),
    }
    Ok(())
}
