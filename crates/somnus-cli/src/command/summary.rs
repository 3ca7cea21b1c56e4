use clap::Args;

use crate::util::PipelineArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[command(flatten)]
    pipeline: PipelineArg,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let output = arg.pipeline.run()?;
    let dataset = &output.dataset;

    println!(
        "Sleep time by age ({} samples, {} bins)",
        output.sample_count,
        dataset.len()
    );
    println!("==========================================\n");
    println!(
        "  {:<10} {:>6} {:>6} {:>6} {:>6} {:>13} {:>8} {:>6} {:>6} {:>6}",
        "Age", "N", "Q1", "Median", "Q3", "Fence", "Outliers", "P5", "P50", "P95",
    );
    println!("  {}", "-".repeat(90));

    let show = |q: Option<f64>| q.map_or("N/A".to_string(), |q| format!("{q:.2}"));
    for entry in dataset.values() {
        let stats = &entry.box_plot;
        let [q1, q2, q3] = stats.quartiles;
        let [r0, r1] = stats.range;
        println!(
            "  {:<10} {:>6} {:>6.2} {:>6.2} {:>6.2} {:>13} {:>8} {:>6} {:>6} {:>6}",
            format!("{}-{}", entry.age_range.start, entry.age_range.end),
            stats.count,
            q1,
            q2,
            q3,
            format!("{r0:.2}..{r1:.2}"),
            stats.outliers.len(),
            show(entry.percentile_at(0.05)),
            show(entry.percentile_at(0.5)),
            show(entry.percentile_at(0.95)),
        );
    }

    if !output.diagnostics.is_empty() {
        println!();
        println!("Diagnostics:");
        for diagnostic in &output.diagnostics {
            println!("  {diagnostic}");
        }
    }
    Ok(())
}
