//! Defines command-line interface options using `clap` for the RuAggregate application.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// A CLI tool for aggregating numeric values by aggregator name
#[derive(Parser, Debug)]
#[command(
    version,
    name = "ru-aggregate",
    about = "Reduce a list of numbers with a named aggregator (MIN, MAX, SUM, AVG, ...)"
)]
#[command(group(ArgGroup::new("action").args(["aggregate", "summary", "list"]).required(true)))]
pub struct Args {
    /// Values to aggregate, comma separated (e.g. 5,3,9.5)
    #[arg(long, allow_hyphen_values = true)]
    pub values: Option<String>,

    /// Read values from a file (separated by commas, spaces or newlines)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Name of the aggregator to apply, matched exactly (e.g. MIN)
    #[arg(short, long)]
    pub aggregate: Option<String>,

    /// Apply every registered aggregator
    #[arg(long)]
    pub summary: bool,

    /// List the registered aggregators
    #[arg(long)]
    pub list: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

impl Args {
    /// Log level implied by `--verbose`
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
