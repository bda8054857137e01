//! Output formatting for CLI commands.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::{Operation, OutputFormat, PhalanxArgs};
use crate::container::ContainerKind;
use crate::error::Result;
use crate::partition::Partition;

/// Report structure for a partition plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanReport {
    pub length: usize,
    pub workers: usize,
    pub base_size: usize,
    pub remainder: usize,
    pub partitions: Vec<Partition>,
}

/// Report structure for a single operation run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub operation: Operation,
    pub kind: ContainerKind,
    pub workers: usize,
    pub elements: usize,
    pub duration_ms: f64,
    pub occurrences: Option<usize>,
    pub positions_found: Option<usize>,
    pub positions: Option<Vec<usize>>,
    pub survivors: Option<usize>,
    pub sorted_len: Option<usize>,
    pub preview: Option<Vec<i64>>,
}

/// Benchmark report comparing parallel runs against sequential baselines.
#[derive(Debug, Serialize, Deserialize)]
pub struct BenchReport {
    pub timestamp: DateTime<Utc>,
    pub size: usize,
    pub workers: usize,
    pub iterations: usize,
    pub warmup: usize,
    pub seed: u64,
    pub operations: Vec<OperationBench>,
    pub total_duration_ms: f64,
}

/// Benchmark results for one operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationBench {
    pub operation: Operation,
    pub parallel_avg_ms: f64,
    pub sequential_avg_ms: f64,
    pub speedup: f64,
    pub verified: bool,
}

/// Display label for an operation.
pub fn operation_label(operation: &Operation) -> &'static str {
    match operation {
        Operation::Count => "count",
        Operation::Indexes => "indexes",
        Operation::RemoveAll => "remove_all",
        Operation::Sort => "sort",
    }
}

/// Output a partition plan in the configured format.
pub fn print_plan(report: &PlanReport, args: &PhalanxArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("Partition Plan:");
                println!("═══════════════");
                println!("Length: {}", report.length);
                println!("Workers: {}", report.workers);
                println!("Base partition size: {}", report.base_size);
                println!("Remainder: {}", report.remainder);
                println!();
            }

            for (i, partition) in report.partitions.iter().enumerate() {
                let range = partition.to_string();
                println!("  #{i:<3} {range:<14} {} elements", partition.len());
            }

            Ok(())
        }
    }
}

/// Output an operation run in the configured format.
pub fn print_run(report: &RunReport, args: &PhalanxArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("Operation Results:");
                println!("══════════════════");
                println!("Operation: {}", operation_label(&report.operation));
                println!("Container kind: {:?}", report.kind);
                println!("Workers: {}", report.workers);
                println!("Elements: {}", report.elements);
                println!("Duration: {:.3}ms", report.duration_ms);
            }

            if let Some(occurrences) = report.occurrences {
                println!("Occurrences: {occurrences}");
            }
            if let Some(found) = report.positions_found {
                println!("Positions found: {found}");
            }
            if let Some(positions) = &report.positions {
                let shown = positions.len();
                let list = format_list(positions);
                if report.positions_found.is_some_and(|total| total > shown) {
                    println!("Positions: {list} (first {shown})");
                } else {
                    println!("Positions: {list}");
                }
            }
            if let Some(survivors) = report.survivors {
                println!("Survivors: {survivors}");
            }
            if let Some(sorted_len) = report.sorted_len {
                println!("Sorted length: {sorted_len}");
            }
            if let Some(preview) = &report.preview {
                println!("Preview: {}", format_list(preview));
            }

            Ok(())
        }
    }
}

/// Output a benchmark report in the configured format.
pub fn print_bench(report: &BenchReport, args: &PhalanxArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("Benchmark Results:");
                println!("══════════════════");
                println!("Elements: {}", report.size);
                println!("Workers: {}", report.workers);
                println!(
                    "Iterations: {} (warmup {})",
                    report.iterations, report.warmup
                );
                println!("Seed: {}", report.seed);
                println!();
            }

            for bench in &report.operations {
                let status = if bench.verified { "ok" } else { "MISMATCH" };
                println!(
                    "{:<11} parallel {:>9.3}ms  sequential {:>9.3}ms  speedup {:>5.2}x  {status}",
                    operation_label(&bench.operation),
                    bench.parallel_avg_ms,
                    bench.sequential_avg_ms,
                    bench.speedup,
                );
            }

            if args.verbosity() > 0 {
                println!();
                println!("Total benchmark time: {:.1}ms", report.total_duration_ms);
            }

            Ok(())
        }
    }
}

/// Save a report to a file as JSON.
pub fn save_report<T: Serialize>(report: &T, file_path: &Path, args: &PhalanxArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };

    let mut file = File::create(file_path)?;
    file.write_all(json.as_bytes())?;

    if args.verbosity() > 0 {
        println!("Report saved to: {}", file_path.display());
    }

    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PhalanxArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a slice of displayable values as a bracketed list.
fn format_list<T: std::fmt::Display>(items: &[T]) -> String {
    let joined = items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
