//! Command line argument parsing for the Phalanx CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Phalanx - partitioned parallel operations over in-memory sequences
#[derive(Parser, Debug, Clone)]
#[command(name = "phalanx")]
#[command(about = "Partitioned parallel operations over in-memory sequences")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PhalanxArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PhalanxArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the partition plan for a sequence length and worker count
    Plan(PlanArgs),

    /// Run one operation over a JSON array read from a file
    Run(RunArgs),

    /// Benchmark parallel operations against sequential baselines
    Bench(BenchArgs),
}

/// Arguments for showing a partition plan
#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    /// Sequence length to partition
    #[arg(value_name = "LENGTH")]
    pub length: usize,

    /// Number of workers
    #[arg(short, long, default_value = "2")]
    pub workers: usize,
}

/// Arguments for running an operation
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to a JSON file holding an array of integers
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Operation to run
    #[arg(short, long, default_value = "count")]
    pub operation: Operation,

    /// Target value for count and indexes
    #[arg(long)]
    pub value: Option<i64>,

    /// Values to remove (comma-separated) for remove-all
    #[arg(long, value_delimiter = ',')]
    pub remove: Vec<i64>,

    /// Number of workers (default: available CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Construct the container as the immutable kind
    #[arg(long)]
    pub immutable: bool,

    /// Maximum number of result entries to print
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Operations available in the CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Count occurrences of a value
    Count,
    /// Find all positions of a value
    Indexes,
    /// Remove all occurrences of a set of values
    RemoveAll,
    /// Sort the sequence ascending
    Sort,
}

/// Arguments for benchmarking
#[derive(Parser, Debug, Clone)]
pub struct BenchArgs {
    /// Number of elements to generate
    #[arg(short, long, default_value = "1000000")]
    pub size: usize,

    /// Number of workers (default: available CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Number of timed iterations per operation
    #[arg(short, long, default_value = "5")]
    pub iterations: usize,

    /// Warmup iterations before benchmarking
    #[arg(long, default_value = "1")]
    pub warmup: usize,

    /// Seed for the generated data
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Smallest generated value (inclusive)
    #[arg(long, default_value = "5")]
    pub min_value: i64,

    /// Largest generated value (inclusive)
    #[arg(long, default_value = "15")]
    pub max_value: i64,

    /// Benchmark mode
    #[arg(short = 'm', long, default_value = "all")]
    pub mode: BenchMode,

    /// Output file for results
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
}

/// Benchmark modes
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchMode {
    /// Benchmark occurrence counting
    Count,
    /// Benchmark position discovery
    Indexes,
    /// Benchmark bulk removal
    RemoveAll,
    /// Benchmark counting sort
    Sort,
    /// Benchmark all operations
    All,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl BenchArgs {
    /// Check that the generated value range is usable.
    pub fn value_range_valid(&self) -> bool {
        self.min_value <= self.max_value
    }
}
