//! Partition task dispatch and synchronous join.

use crossbeam_channel::unbounded;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{PhalanxError, Result};
use crate::executor::config::ExecutorConfig;
use crate::executor::metrics::Timer;
use crate::executor::task::{PartitionTask, TaskResult};
use crate::partition::Partition;

/// Executor running one task per partition on a fixed-size worker pool.
///
/// The pool holds exactly as many threads as there are workers, so every
/// partition task gets its own thread for the duration of a run. A run
/// blocks the caller until all tasks have finished and always hands results
/// back in submission order, regardless of completion order.
pub struct PartitionExecutor {
    /// Thread pool for parallel execution.
    pool: ThreadPool,

    /// Number of worker threads in the pool.
    workers: usize,
}

impl PartitionExecutor {
    /// Create a new executor backed by a fresh pool of `workers` threads.
    pub fn new(workers: usize, config: &ExecutorConfig) -> Result<Self> {
        if workers == 0 {
            return Err(PhalanxError::configuration(
                "worker pool requires at least one thread",
            ));
        }

        let prefix = config.thread_name_prefix.clone();
        let mut builder = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{prefix}-{i}"));

        if let Some(stack_size) = config.thread_stack_size {
            builder = builder.stack_size(stack_size);
        }

        let pool = builder
            .build()
            .map_err(|e| PhalanxError::thread_pool(format!("failed to create worker pool: {e}")))?;

        Ok(Self { pool, workers })
    }

    /// Get the number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Dispatch one task per partition and wait for all of them.
    ///
    /// Each task sees only the slice of `data` covered by its partition.
    /// The returned results are in submission order; faulted tasks are
    /// reported in place rather than terminating the run early.
    pub fn run<T, R, F>(
        &self,
        data: &[T],
        partitions: &[Partition],
        work: F,
    ) -> Result<Vec<TaskResult<R>>>
    where
        T: Sync,
        R: Send,
        F: Fn(&Partition, &[T]) -> Result<R> + Send + Sync,
    {
        for partition in partitions {
            if partition.start > partition.end || partition.end > data.len() {
                return Err(PhalanxError::configuration(format!(
                    "partition {partition} does not fit a sequence of length {}",
                    data.len()
                )));
            }
        }

        let tasks: Vec<PartitionTask> = partitions
            .iter()
            .enumerate()
            .map(|(ordinal, partition)| PartitionTask::new(ordinal, *partition))
            .collect();

        let (tx, rx) = unbounded();

        // Every spawned task finishes before scope returns, so the receive
        // loop below never blocks on a straggler.
        self.pool.scope(|scope| {
            for task in &tasks {
                let tx = tx.clone();
                let work = &work;

                scope.spawn(move |_| {
                    let timer = Timer::start();
                    let slice = &data[task.partition.range()];
                    let result = match work(&task.partition, slice) {
                        Ok(output) => TaskResult::success(task, output, timer.stop()),
                        Err(error) => TaskResult::failure(task, error, timer.stop()),
                    };
                    let _ = tx.send(result);
                });
            }
        });

        // Drop the original sender so the receiver sees the channel close.
        drop(tx);

        let mut slots: Vec<Option<TaskResult<R>>> = Vec::with_capacity(tasks.len());
        slots.resize_with(tasks.len(), || None);
        for result in rx {
            let ordinal = result.ordinal;
            slots[ordinal] = Some(result);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for (ordinal, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(result) => results.push(result),
                None => {
                    return Err(PhalanxError::internal(format!(
                        "no result received for partition task {ordinal}"
                    )));
                }
            }
        }

        Ok(results)
    }
}
