//! Parallel executor module for running per-partition tasks on a worker pool.
//!
//! This module provides functionality to:
//! - Build fixed-size worker pools, one thread per partition
//! - Dispatch one task per partition and join synchronously
//! - Hand results back in submission order
//! - Monitor performance metrics

pub mod config;
pub mod engine;
pub mod metrics;
pub mod task;

pub use config::ExecutorConfig;
pub use engine::PartitionExecutor;
pub use metrics::{ExecutorMetrics, ExecutorMetricsCollector, ThroughputMetrics, Timer};
pub use task::{PartitionTask, TaskResult, collect_outputs};
