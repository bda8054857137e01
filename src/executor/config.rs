//! Configuration for partitioned execution.

use serde::{Deserialize, Serialize};

/// Configuration for the partition executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Name prefix for worker pool threads.
    pub thread_name_prefix: String,

    /// Stack size for worker threads, in bytes.
    /// If None, uses the platform default.
    pub thread_stack_size: Option<usize>,

    /// Whether to enable metrics collection.
    pub enable_metrics: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "phalanx-worker".to_string(),
            thread_stack_size: None,
            enable_metrics: true,
        }
    }
}

impl ExecutorConfig {
    /// Set the name prefix for worker threads.
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the stack size for worker threads.
    pub fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }

    /// Set whether to collect metrics.
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.thread_name_prefix, "phalanx-worker");
        assert_eq!(config.thread_stack_size, None);
        assert!(config.enable_metrics);
    }

    #[test]
    fn test_config_builder() {
        let config = ExecutorConfig::default()
            .with_thread_name_prefix("custom-worker")
            .with_thread_stack_size(2 * 1024 * 1024)
            .with_metrics(false);

        assert_eq!(config.thread_name_prefix, "custom-worker");
        assert_eq!(config.thread_stack_size, Some(2 * 1024 * 1024));
        assert!(!config.enable_metrics);
    }
}
