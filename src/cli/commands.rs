//! Command implementations for the Phalanx CLI.

use std::fs;
use std::hint::black_box;
use std::time::Instant;

use ahash::AHashSet;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::args::{BenchArgs, BenchMode, Command, Operation, PhalanxArgs, PlanArgs, RunArgs};
use crate::cli::output::{
    BenchReport, OperationBench, PlanReport, RunReport, print_bench, print_plan, print_run,
    save_report,
};
use crate::container::{ContainerKind, PartitionedContainer};
use crate::error::{PhalanxError, Result};
use crate::executor::{ExecutorConfig, Timer};
use crate::partition::Partition;

/// Execute a CLI command.
pub fn execute_command(args: PhalanxArgs) -> Result<()> {
    match &args.command {
        Command::Plan(plan_args) => show_plan(plan_args.clone(), &args),
        Command::Run(run_args) => run_operation(run_args.clone(), &args),
        Command::Bench(bench_args) => run_bench(bench_args.clone(), &args),
    }
}

/// Show the partition plan for a sequence length and worker count.
fn show_plan(args: PlanArgs, cli_args: &PhalanxArgs) -> Result<()> {
    if args.workers < 2 {
        return Err(PhalanxError::configuration(format!(
            "worker count must be at least 2, got {}",
            args.workers
        )));
    }
    if args.workers > args.length {
        return Err(PhalanxError::configuration(format!(
            "worker count {} exceeds sequence length {}",
            args.workers, args.length
        )));
    }

    let partitions = Partition::split(args.length, args.workers);
    let base_size = args.length / args.workers;
    let report = PlanReport {
        length: args.length,
        workers: args.workers,
        base_size,
        remainder: args.length - base_size * args.workers,
        partitions,
    };

    print_plan(&report, cli_args)
}

/// Run one operation over data loaded from a JSON file.
fn run_operation(args: RunArgs, cli_args: &PhalanxArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading data from: {}", args.data_file.display());
    }

    let raw = fs::read_to_string(&args.data_file)?;
    let elements: Vec<i64> = serde_json::from_str(&raw)?;

    let workers = args
        .workers
        .unwrap_or_else(|| default_workers(elements.len()));
    let kind = if args.immutable {
        ContainerKind::Immutable
    } else {
        ContainerKind::Mutable
    };
    let container =
        PartitionedContainer::with_config(elements, kind, workers, ExecutorConfig::default())?;

    if cli_args.verbosity() > 1 {
        println!(
            "Loaded {} elements, using {} workers",
            container.len(),
            container.workers()
        );
    }

    let mut report = RunReport {
        operation: args.operation.clone(),
        kind,
        workers,
        elements: container.len(),
        duration_ms: 0.0,
        occurrences: None,
        positions_found: None,
        positions: None,
        survivors: None,
        sorted_len: None,
        preview: None,
    };

    let start_time = Instant::now();
    match args.operation {
        Operation::Count => {
            let value = require_value(&args, "count")?;
            report.occurrences = Some(container.count(&value)?);
        }
        Operation::Indexes => {
            let value = require_value(&args, "indexes")?;
            let positions = container.indexes(&value)?;
            report.positions_found = Some(positions.len());
            report.positions = Some(truncated(&positions, args.limit));
        }
        Operation::RemoveAll => {
            let survivors = container.remove_all(&args.remove)?;
            report.survivors = Some(survivors.len());
            report.preview = Some(truncated(&survivors, args.limit));
        }
        Operation::Sort => {
            let sorted = container.sorted()?;
            report.sorted_len = Some(sorted.len());
            report.preview = Some(truncated(&sorted, args.limit));
        }
    }
    report.duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    print_run(&report, cli_args)
}

/// Benchmark parallel operations against their sequential baselines.
fn run_bench(args: BenchArgs, cli_args: &PhalanxArgs) -> Result<()> {
    if !args.value_range_valid() {
        return Err(PhalanxError::configuration(format!(
            "min value {} exceeds max value {}",
            args.min_value, args.max_value
        )));
    }

    let workers = args.workers.unwrap_or_else(|| default_workers(args.size));

    if cli_args.verbosity() > 0 {
        println!("Benchmarking {} elements with {workers} workers", args.size);
        println!("Mode: {:?}", args.mode);
        println!("Iterations: {} (warmup {})", args.iterations, args.warmup);
        println!();
    }

    let data = generate_data(args.size, args.seed, args.min_value, args.max_value);
    let container = PartitionedContainer::new(data.clone(), workers)?;

    // Midpoint of the generated range, the densest value to search for.
    // Summed in i128 so extreme bounds cannot overflow.
    let target = ((args.min_value as i128 + args.max_value as i128) / 2) as i64;
    let removals = vec![target, target.saturating_add(1)];

    let start_time = Instant::now();
    let mut operations = Vec::new();
    for operation in operations_for_mode(&args.mode) {
        operations.push(bench_operation(
            &container, &data, operation, target, &removals, &args,
        )?);
    }

    let report = BenchReport {
        timestamp: Utc::now(),
        size: args.size,
        workers,
        iterations: args.iterations.max(1),
        warmup: args.warmup,
        seed: args.seed,
        operations,
        total_duration_ms: start_time.elapsed().as_secs_f64() * 1000.0,
    };

    if let Some(output_file) = &args.output_file {
        save_report(&report, output_file, cli_args)?;
    }

    print_bench(&report, cli_args)
}

/// Benchmark one operation, verifying its output against the sequential baseline.
fn bench_operation(
    container: &PartitionedContainer<i64>,
    data: &[i64],
    operation: Operation,
    target: i64,
    removals: &[i64],
    args: &BenchArgs,
) -> Result<OperationBench> {
    let iterations = args.iterations.max(1);

    let (verified, parallel_avg_ms, sequential_avg_ms) = match operation {
        Operation::Count => {
            let verified = container.count(&target)? == sequential_count(data, target);
            for _ in 0..args.warmup {
                container.count(&target)?;
            }
            let parallel = time_avg(iterations, || container.count(&target).map(drop))?;
            let sequential = time_avg(iterations, || {
                black_box(sequential_count(data, target));
                Ok(())
            })?;
            (verified, parallel, sequential)
        }
        Operation::Indexes => {
            let verified = container.indexes(&target)? == sequential_indexes(data, target);
            for _ in 0..args.warmup {
                container.indexes(&target)?;
            }
            let parallel = time_avg(iterations, || container.indexes(&target).map(drop))?;
            let sequential = time_avg(iterations, || {
                black_box(sequential_indexes(data, target));
                Ok(())
            })?;
            (verified, parallel, sequential)
        }
        Operation::RemoveAll => {
            let verified = container.remove_all(removals)? == sequential_remove_all(data, removals);
            for _ in 0..args.warmup {
                container.remove_all(removals)?;
            }
            let parallel = time_avg(iterations, || container.remove_all(removals).map(drop))?;
            let sequential = time_avg(iterations, || {
                black_box(sequential_remove_all(data, removals));
                Ok(())
            })?;
            (verified, parallel, sequential)
        }
        Operation::Sort => {
            let verified = container.sorted()? == sequential_sort(data);
            for _ in 0..args.warmup {
                container.sorted()?;
            }
            let parallel = time_avg(iterations, || container.sorted().map(drop))?;
            let sequential = time_avg(iterations, || {
                black_box(sequential_sort(data));
                Ok(())
            })?;
            (verified, parallel, sequential)
        }
    };

    let speedup = if parallel_avg_ms > 0.0 {
        sequential_avg_ms / parallel_avg_ms
    } else {
        0.0
    };

    Ok(OperationBench {
        operation,
        parallel_avg_ms,
        sequential_avg_ms,
        speedup,
        verified,
    })
}

/// Average wall-clock milliseconds over a number of runs.
fn time_avg<F>(iterations: usize, mut run: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let timer = Timer::start();
    for _ in 0..iterations {
        run()?;
    }
    Ok(timer.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

/// Generate a seeded benchmark data set.
fn generate_data(size: usize, seed: u64, min_value: i64, max_value: i64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| rng.random_range(min_value..=max_value))
        .collect()
}

fn operations_for_mode(mode: &BenchMode) -> Vec<Operation> {
    match mode {
        BenchMode::Count => vec![Operation::Count],
        BenchMode::Indexes => vec![Operation::Indexes],
        BenchMode::RemoveAll => vec![Operation::RemoveAll],
        BenchMode::Sort => vec![Operation::Sort],
        BenchMode::All => vec![
            Operation::Count,
            Operation::Indexes,
            Operation::RemoveAll,
            Operation::Sort,
        ],
    }
}

fn require_value(args: &RunArgs, operation: &str) -> Result<i64> {
    args.value
        .ok_or_else(|| PhalanxError::configuration(format!("--value is required for {operation}")))
}

fn truncated<T: Copy>(items: &[T], limit: usize) -> Vec<T> {
    items.iter().copied().take(limit).collect()
}

/// Pick a worker count for a sequence when none was given.
fn default_workers(length: usize) -> usize {
    num_cpus::get().clamp(2, length.max(2))
}

fn sequential_count(data: &[i64], value: i64) -> usize {
    data.iter().filter(|element| **element == value).count()
}

fn sequential_indexes(data: &[i64], value: i64) -> Vec<usize> {
    data.iter()
        .enumerate()
        .filter_map(|(index, element)| (*element == value).then_some(index))
        .collect()
}

fn sequential_remove_all(data: &[i64], values: &[i64]) -> Vec<i64> {
    let removals: AHashSet<i64> = values.iter().copied().collect();
    data.iter()
        .copied()
        .filter(|element| !removals.contains(element))
        .collect()
}

fn sequential_sort(data: &[i64]) -> Vec<i64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    sorted
}
