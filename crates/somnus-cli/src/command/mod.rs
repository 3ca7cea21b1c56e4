use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    bin::BinArg, dotbin::DotbinArg, lookup::LookupArg, quiz::QuizArg, summary::SummaryArg,
};

mod bin;
mod dotbin;
mod lookup;
mod quiz;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print one row of statistics per age bin
    Summary(#[clap(flatten)] SummaryArg),
    /// Show percentiles, dots and box statistics of one age bin
    Bin(#[clap(flatten)] BinArg),
    /// Look up the percentile of a sleep time at a given age
    Lookup(#[clap(flatten)] LookupArg),
    /// Score a percentile guess
    Quiz(#[clap(flatten)] QuizArg),
    /// Run dot density binning on literal values
    Dotbin(#[clap(flatten)] DotbinArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match &args.mode {
        Mode::Summary(arg) => summary::run(arg)?,
        Mode::Bin(arg) => bin::run(arg)?,
        Mode::Lookup(arg) => lookup::run(arg)?,
        Mode::Quiz(arg) => quiz::run(arg)?,
        Mode::Dotbin(arg) => dotbin::run(arg)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup_with_pipeline_options() {
        let args = CommandArgs::try_parse_from([
            "somnus",
            "-v",
            "lookup",
            "--age",
            "40",
            "--sleep-time",
            "7.5",
            "--seed",
            "3",
            "--smooth",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        assert!(matches!(args.mode, Mode::Lookup(_)));
    }

    #[test]
    fn test_dotbin_requires_values() {
        assert!(CommandArgs::try_parse_from(["somnus", "dotbin"]).is_err());
        assert!(CommandArgs::try_parse_from(["somnus", "dotbin", "--", "-1.5", "2"]).is_ok());
    }
}
