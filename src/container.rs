//! Partitioned container facade over the parallel operations.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PhalanxError, Result};
use crate::executor::config::ExecutorConfig;
use crate::executor::engine::PartitionExecutor;
use crate::executor::metrics::{ExecutorMetrics, ExecutorMetricsCollector, Timer};
use crate::executor::task::collect_outputs;
use crate::ops::{CountOp, IndexesOp, PartitionedOp, RemoveAllOp, SortOp};
use crate::partition::Partition;

/// Kind of sequence backing a container.
///
/// The kind is fixed at construction time and gates which operations the
/// container supports: removal is only available on the mutable kind, even
/// though no operation ever mutates the backing sequence in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Sequence kind that supports removal.
    Mutable,

    /// Sequence kind that rejects removal.
    Immutable,
}

impl ContainerKind {
    /// Whether containers of this kind support `remove_all`.
    pub fn supports_removal(self) -> bool {
        matches!(self, ContainerKind::Mutable)
    }
}

/// An in-memory sequence with divide-and-conquer query operations.
///
/// The sequence is split into as many disjoint contiguous partitions as
/// there are workers, and each operation dispatches one task per partition
/// onto a fresh fixed-size pool. All operations leave the backing sequence
/// untouched and return freshly built outputs equal to what a sequential
/// scan would produce.
pub struct PartitionedContainer<T> {
    /// The backing sequence.
    elements: Vec<T>,

    /// Kind of the backing sequence.
    kind: ContainerKind,

    /// Number of workers, fixed at construction.
    workers: usize,

    /// Executor configuration.
    config: ExecutorConfig,

    /// Metrics collector shared across operations.
    metrics: Arc<ExecutorMetricsCollector>,
}

impl<T> PartitionedContainer<T> {
    /// Create a container of the mutable kind.
    pub fn new(elements: Vec<T>, workers: usize) -> Result<Self> {
        Self::with_config(
            elements,
            ContainerKind::Mutable,
            workers,
            ExecutorConfig::default(),
        )
    }

    /// Create a container of the immutable kind.
    pub fn new_immutable(elements: Vec<T>, workers: usize) -> Result<Self> {
        Self::with_config(
            elements,
            ContainerKind::Immutable,
            workers,
            ExecutorConfig::default(),
        )
    }

    /// Create a container with an explicit kind and executor configuration.
    ///
    /// The worker count must be at least 2 and no larger than the sequence
    /// length, so every worker owns a non-empty partition. Violations are
    /// rejected here, never later during an operation.
    pub fn with_config(
        elements: Vec<T>,
        kind: ContainerKind,
        workers: usize,
        config: ExecutorConfig,
    ) -> Result<Self> {
        if workers < 2 {
            return Err(PhalanxError::configuration(format!(
                "worker count must be at least 2, got {workers}"
            )));
        }
        if workers > elements.len() {
            return Err(PhalanxError::configuration(format!(
                "worker count {workers} exceeds sequence length {}",
                elements.len()
            )));
        }

        Ok(Self {
            elements,
            kind,
            workers,
            config,
            metrics: Arc::new(ExecutorMetricsCollector::new()),
        })
    }

    /// Number of elements in the backing sequence.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the backing sequence is empty.
    ///
    /// Construction requires at least two elements, so this only returns
    /// true for containers obtained through future relaxations of that rule.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Kind of the backing sequence.
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Number of workers used by every operation.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The backing sequence as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// The partition plan every operation will use.
    pub fn partitions(&self) -> Vec<Partition> {
        Partition::split(self.elements.len(), self.workers)
    }

    /// Consume the container and return the backing sequence.
    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }

    /// Get a snapshot of the operation metrics.
    pub fn metrics(&self) -> ExecutorMetrics {
        self.metrics.snapshot()
    }

    /// Reset the operation metrics.
    pub fn reset_metrics(&self) {
        self.metrics.reset()
    }
}

impl<T: Send + Sync> PartitionedContainer<T> {
    /// Count how many elements equal `value`.
    pub fn count(&self, value: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        self.execute(&CountOp::new(value))
    }

    /// Find every position holding `value`, in ascending order.
    pub fn indexes(&self, value: &T) -> Result<Vec<usize>>
    where
        T: PartialEq,
    {
        self.execute(&IndexesOp::new(value))
    }

    /// Return the sequence with every occurrence of `values` removed,
    /// keeping the survivors in their original order.
    ///
    /// Only containers of the mutable kind support this operation.
    pub fn remove_all(&self, values: &[T]) -> Result<Vec<T>>
    where
        T: Eq + Hash + Clone,
    {
        if !self.kind.supports_removal() {
            return Err(PhalanxError::unsupported(format!(
                "remove_all requires a mutable container, kind is {:?}",
                self.kind
            )));
        }

        self.execute(&RemoveAllOp::new(values.iter().cloned()))
    }

    /// Return the sequence sorted ascending, via per-partition histograms.
    pub fn sorted(&self) -> Result<Vec<T>>
    where
        T: Ord + Hash + Clone,
    {
        self.execute(&SortOp::new())
    }

    /// Run one operation: partition, dispatch, join, merge.
    fn execute<O: PartitionedOp<T>>(&self, op: &O) -> Result<O::Output> {
        let timer = Timer::start();
        let partitions = self.partitions();
        let tasks_dispatched = partitions.len() as u64;

        let mut slowest_task = Duration::ZERO;
        let merged = self.dispatch(op, &partitions, &mut slowest_task);

        if self.config.enable_metrics {
            self.metrics.record_operation(
                timer.stop(),
                merged.is_ok(),
                self.elements.len() as u64,
                tasks_dispatched,
                slowest_task,
            );
        }

        merged
    }

    fn dispatch<O: PartitionedOp<T>>(
        &self,
        op: &O,
        partitions: &[Partition],
        slowest_task: &mut Duration,
    ) -> Result<O::Output> {
        let executor = PartitionExecutor::new(self.workers, &self.config)?;
        let results = executor.run(&self.elements, partitions, |partition, slice| {
            op.run_partition(partition, slice)
        })?;

        if let Some(max) = results.iter().map(|result| result.execution_time).max() {
            *slowest_task = max;
        }

        let partials = collect_outputs(results)?;
        op.merge(partials)
    }
}
