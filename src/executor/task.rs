//! Partition task definitions for parallel execution.

use std::time::Duration;

use crate::error::{PhalanxError, Result};
use crate::partition::Partition;

/// A unit of work covering one partition of the sequence.
#[derive(Debug, Clone)]
pub struct PartitionTask {
    /// Unique identifier for this task.
    pub task_id: String,

    /// Position of this task in the submission order.
    pub ordinal: usize,

    /// Index range this task is responsible for.
    pub partition: Partition,
}

impl PartitionTask {
    /// Create a new partition task.
    pub fn new(ordinal: usize, partition: Partition) -> Self {
        let task_id = format!("partition{ordinal}_{}", uuid::Uuid::new_v4());
        Self {
            task_id,
            ordinal,
            partition,
        }
    }
}

/// Result of executing a partition task.
#[derive(Debug)]
pub struct TaskResult<R> {
    /// Task ID this result belongs to.
    pub task_id: String,

    /// Submission-order position of the originating task.
    pub ordinal: usize,

    /// Partial output if successful.
    pub output: Option<R>,

    /// Error if the task failed.
    pub error: Option<PhalanxError>,

    /// Execution time for this task.
    pub execution_time: Duration,
}

impl<R> TaskResult<R> {
    /// Create a successful task result.
    pub fn success(task: &PartitionTask, output: R, execution_time: Duration) -> Self {
        Self {
            task_id: task.task_id.clone(),
            ordinal: task.ordinal,
            output: Some(output),
            error: None,
            execution_time,
        }
    }

    /// Create a failed task result.
    pub fn failure(task: &PartitionTask, error: PhalanxError, execution_time: Duration) -> Self {
        Self {
            task_id: task.task_id.clone(),
            ordinal: task.ordinal,
            output: None,
            error: Some(error),
            execution_time,
        }
    }

    /// Check if the task was successful.
    pub fn is_success(&self) -> bool {
        self.output.is_some() && self.error.is_none()
    }
}

/// Extract the per-partition outputs from an ordered result set.
///
/// Results must already be in submission order. A single faulted task fails
/// the whole operation; when several partitions fault, the one covering the
/// lowest ordinal is reported.
pub fn collect_outputs<R>(results: Vec<TaskResult<R>>) -> Result<Vec<R>> {
    let mut outputs = Vec::with_capacity(results.len());

    for result in results {
        if let Some(error) = result.error {
            return Err(PhalanxError::worker(format!(
                "partition task {} (ordinal {}) failed: {error}",
                result.task_id, result.ordinal
            )));
        }

        match result.output {
            Some(output) => outputs.push(output),
            None => {
                return Err(PhalanxError::internal(format!(
                    "partition task {} produced no output",
                    result.task_id
                )));
            }
        }
    }

    Ok(outputs)
}
