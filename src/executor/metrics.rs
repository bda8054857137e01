//! Metrics collection for partitioned operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collected during partitioned operations.
#[derive(Debug, Clone)]
pub struct ExecutorMetrics {
    /// Total number of operations executed.
    pub total_operations: u64,

    /// Number of successful operations.
    pub successful_operations: u64,

    /// Number of failed operations.
    pub failed_operations: u64,

    /// Total number of elements processed.
    pub total_elements_processed: u64,

    /// Total number of partition tasks dispatched.
    pub total_tasks_dispatched: u64,

    /// Total execution time across all operations.
    pub total_execution_time: Duration,

    /// Average execution time per operation.
    pub avg_execution_time: Duration,

    /// Maximum execution time observed.
    pub max_execution_time: Duration,

    /// Minimum execution time observed.
    pub min_execution_time: Duration,

    /// Longest single partition task observed (the straggler).
    pub max_task_execution_time: Duration,

    /// Throughput metrics.
    pub throughput: ThroughputMetrics,
}

impl Default for ExecutorMetrics {
    fn default() -> Self {
        Self {
            total_operations: 0,
            successful_operations: 0,
            failed_operations: 0,
            total_elements_processed: 0,
            total_tasks_dispatched: 0,
            total_execution_time: Duration::ZERO,
            avg_execution_time: Duration::ZERO,
            max_execution_time: Duration::ZERO,
            min_execution_time: Duration::MAX,
            max_task_execution_time: Duration::ZERO,
            throughput: ThroughputMetrics::default(),
        }
    }
}

/// Throughput metrics.
#[derive(Debug, Clone, Default)]
pub struct ThroughputMetrics {
    /// Elements processed per second (current rate).
    pub elements_per_second: f64,

    /// Operations per second (current rate).
    pub ops_per_second: f64,

    /// Peak elements per second observed.
    pub peak_elements_per_second: f64,

    /// Peak operations per second observed.
    pub peak_ops_per_second: f64,

    /// Average elements per second over entire session.
    pub avg_elements_per_second: f64,

    /// Average operations per second over entire session.
    pub avg_ops_per_second: f64,
}

/// Collector for gathering metrics during partitioned operations.
pub struct ExecutorMetricsCollector {
    /// Atomic counters for thread-safe collection.
    total_operations: Arc<AtomicU64>,
    successful_operations: Arc<AtomicU64>,
    failed_operations: Arc<AtomicU64>,
    total_elements_processed: Arc<AtomicU64>,
    total_tasks_dispatched: Arc<AtomicU64>,
    total_execution_nanos: Arc<AtomicU64>,
    max_execution_nanos: Arc<AtomicU64>,
    min_execution_nanos: Arc<AtomicU64>,
    max_task_execution_nanos: Arc<AtomicU64>,

    /// Start time for the collector.
    start_time: Instant,

    /// Window for calculating current throughput.
    throughput_window: Arc<parking_lot::Mutex<ThroughputWindow>>,
}

/// Window for calculating throughput metrics.
#[derive(Debug)]
struct ThroughputWindow {
    /// Timestamps and element counts for recent operations.
    recent_operations: std::collections::VecDeque<(Instant, u64)>,

    /// Maximum window size.
    window_size: Duration,

    /// Peak values observed.
    peak_elements_per_second: f64,
    peak_ops_per_second: f64,
}

impl ThroughputWindow {
    fn new(window_size: Duration) -> Self {
        Self {
            recent_operations: std::collections::VecDeque::new(),
            window_size,
            peak_elements_per_second: 0.0,
            peak_ops_per_second: 0.0,
        }
    }

    fn add_operation(&mut self, element_count: u64) {
        let now = Instant::now();
        self.recent_operations.push_back((now, element_count));

        // Remove old entries outside the window
        while let Some(&(timestamp, _)) = self.recent_operations.front() {
            if now.duration_since(timestamp) > self.window_size {
                self.recent_operations.pop_front();
            } else {
                break;
            }
        }

        // Calculate current throughput
        let total_elements: u64 = self.recent_operations.iter().map(|(_, count)| count).sum();
        let ops_count = self.recent_operations.len() as u64;

        if let Some((oldest_time, _)) = self.recent_operations.front() {
            let window_duration = now.duration_since(*oldest_time).as_secs_f64();
            if window_duration > 0.0 {
                let current_elements_per_sec = total_elements as f64 / window_duration;
                let current_ops_per_sec = ops_count as f64 / window_duration;

                if current_elements_per_sec > self.peak_elements_per_second {
                    self.peak_elements_per_second = current_elements_per_sec;
                }
                if current_ops_per_sec > self.peak_ops_per_second {
                    self.peak_ops_per_second = current_ops_per_sec;
                }
            }
        }
    }

    fn get_current_throughput(&self) -> (f64, f64) {
        if self.recent_operations.is_empty() {
            return (0.0, 0.0);
        }

        let total_elements: u64 = self.recent_operations.iter().map(|(_, count)| count).sum();
        let ops_count = self.recent_operations.len() as u64;

        if let (Some((oldest_time, _)), Some((newest_time, _))) = (
            self.recent_operations.front(),
            self.recent_operations.back(),
        ) {
            let window_duration = newest_time.duration_since(*oldest_time).as_secs_f64();
            if window_duration > 0.0 {
                let elements_per_sec = total_elements as f64 / window_duration;
                let ops_per_sec = ops_count as f64 / window_duration;
                return (elements_per_sec, ops_per_sec);
            }
        }

        (0.0, 0.0)
    }
}

impl ExecutorMetricsCollector {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            total_operations: Arc::new(AtomicU64::new(0)),
            successful_operations: Arc::new(AtomicU64::new(0)),
            failed_operations: Arc::new(AtomicU64::new(0)),
            total_elements_processed: Arc::new(AtomicU64::new(0)),
            total_tasks_dispatched: Arc::new(AtomicU64::new(0)),
            total_execution_nanos: Arc::new(AtomicU64::new(0)),
            max_execution_nanos: Arc::new(AtomicU64::new(0)),
            min_execution_nanos: Arc::new(AtomicU64::new(u64::MAX)),
            max_task_execution_nanos: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
            throughput_window: Arc::new(parking_lot::Mutex::new(ThroughputWindow::new(
                Duration::from_secs(60),
            ))),
        }
    }

    /// Record one partitioned operation.
    pub fn record_operation(
        &self,
        execution_time: Duration,
        success: bool,
        elements_processed: u64,
        tasks_dispatched: u64,
        slowest_task: Duration,
    ) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);

        if success {
            self.successful_operations.fetch_add(1, Ordering::Relaxed);
            self.total_elements_processed
                .fetch_add(elements_processed, Ordering::Relaxed);
        } else {
            self.failed_operations.fetch_add(1, Ordering::Relaxed);
        }

        self.total_tasks_dispatched
            .fetch_add(tasks_dispatched, Ordering::Relaxed);

        let nanos = execution_time.as_nanos() as u64;
        self.total_execution_nanos
            .fetch_add(nanos, Ordering::Relaxed);

        // Update max execution time
        loop {
            let current_max = self.max_execution_nanos.load(Ordering::Relaxed);
            if nanos <= current_max {
                break;
            }
            if self
                .max_execution_nanos
                .compare_exchange_weak(current_max, nanos, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }

        // Update min execution time
        loop {
            let current_min = self.min_execution_nanos.load(Ordering::Relaxed);
            if nanos >= current_min {
                break;
            }
            if self
                .min_execution_nanos
                .compare_exchange_weak(current_min, nanos, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }

        // Update straggler time
        let task_nanos = slowest_task.as_nanos() as u64;
        loop {
            let current_max = self.max_task_execution_nanos.load(Ordering::Relaxed);
            if task_nanos <= current_max {
                break;
            }
            if self
                .max_task_execution_nanos
                .compare_exchange_weak(
                    current_max,
                    task_nanos,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                break;
            }
        }

        // Update throughput window
        self.throughput_window.lock().add_operation(elements_processed);
    }

    /// Get the current metrics snapshot.
    pub fn snapshot(&self) -> ExecutorMetrics {
        let total_operations = self.total_operations.load(Ordering::Relaxed);
        let total_elements = self.total_elements_processed.load(Ordering::Relaxed);
        let total_nanos = self.total_execution_nanos.load(Ordering::Relaxed);

        let avg_nanos = if total_operations > 0 {
            total_nanos / total_operations
        } else {
            0
        };

        let min_nanos = self.min_execution_nanos.load(Ordering::Relaxed);
        let min_duration = if min_nanos == u64::MAX {
            Duration::ZERO
        } else {
            Duration::from_nanos(min_nanos)
        };

        // Calculate overall throughput
        let total_time = self.start_time.elapsed();
        let avg_elements_per_second = if total_time.as_secs() > 0 {
            total_elements as f64 / total_time.as_secs_f64()
        } else {
            0.0
        };

        let avg_ops_per_second = if total_time.as_secs() > 0 {
            total_operations as f64 / total_time.as_secs_f64()
        } else {
            0.0
        };

        // Get current throughput from window
        let throughput_window = self.throughput_window.lock();
        let (current_elements_per_sec, current_ops_per_sec) =
            throughput_window.get_current_throughput();

        ExecutorMetrics {
            total_operations,
            successful_operations: self.successful_operations.load(Ordering::Relaxed),
            failed_operations: self.failed_operations.load(Ordering::Relaxed),
            total_elements_processed: total_elements,
            total_tasks_dispatched: self.total_tasks_dispatched.load(Ordering::Relaxed),
            total_execution_time: Duration::from_nanos(total_nanos),
            avg_execution_time: Duration::from_nanos(avg_nanos),
            max_execution_time: Duration::from_nanos(
                self.max_execution_nanos.load(Ordering::Relaxed),
            ),
            min_execution_time: min_duration,
            max_task_execution_time: Duration::from_nanos(
                self.max_task_execution_nanos.load(Ordering::Relaxed),
            ),
            throughput: ThroughputMetrics {
                elements_per_second: current_elements_per_sec,
                ops_per_second: current_ops_per_sec,
                peak_elements_per_second: throughput_window.peak_elements_per_second,
                peak_ops_per_second: throughput_window.peak_ops_per_second,
                avg_elements_per_second,
                avg_ops_per_second,
            },
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.total_operations.store(0, Ordering::Relaxed);
        self.successful_operations.store(0, Ordering::Relaxed);
        self.failed_operations.store(0, Ordering::Relaxed);
        self.total_elements_processed.store(0, Ordering::Relaxed);
        self.total_tasks_dispatched.store(0, Ordering::Relaxed);
        self.total_execution_nanos.store(0, Ordering::Relaxed);
        self.max_execution_nanos.store(0, Ordering::Relaxed);
        self.min_execution_nanos.store(u64::MAX, Ordering::Relaxed);
        self.max_task_execution_nanos.store(0, Ordering::Relaxed);

        let mut window = self.throughput_window.lock();
        window.recent_operations.clear();
        window.peak_elements_per_second = 0.0;
        window.peak_ops_per_second = 0.0;
    }

    /// Get the uptime of this collector.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExecutorMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
