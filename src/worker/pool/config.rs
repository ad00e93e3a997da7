use std::time::Duration;

/// Configuration for the worker pool
#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    /// Maximum tasks executing at once, across every batch and lane.
    ///
    /// Task bodies hold a database connection while persisting, so keep this below the
    /// connection pool size.
    pub max_concurrent_tasks: usize,

    /// Number of dispatcher tasks polling each lane.
    ///
    /// Automatically calculated as 1 dispatcher per 40 concurrent tasks (minimum 1).
    pub dispatcher_count: usize,

    /// How long a dispatcher waits between polls when its lane is empty (milliseconds).
    pub poll_interval_ms: u64,

    /// Maximum time a single task can run before it is counted as failed (seconds).
    pub task_timeout_seconds: u64,

    /// Maximum time to wait for a dispatcher to shutdown (seconds).
    /// If a dispatcher doesn't stop within this time, a warning is logged.
    pub shutdown_timeout_seconds: u64,

    /// How often finished batch snapshots are pruned (milliseconds).
    pub cleanup_interval_ms: u64,

    /// How long a finalized batch stays queryable (seconds).
    pub finished_batch_ttl_seconds: u64,

    /// Maximum batches waiting in the queue across all lanes.
    pub max_queued_batches: usize,
}

impl WorkerPoolConfig {
    /// Create a new configuration with sensible defaults
    ///
    /// # Arguments
    /// * `max_concurrent_tasks` - Maximum concurrent tasks across all batches
    pub fn new(max_concurrent_tasks: usize) -> Self {
        // 1 dispatcher per 40 concurrent tasks, minimum 1
        let dispatcher_count = max_concurrent_tasks.div_ceil(40).max(1);

        Self {
            max_concurrent_tasks,
            dispatcher_count,
            poll_interval_ms: 50,
            task_timeout_seconds: 60,
            shutdown_timeout_seconds: 5,
            cleanup_interval_ms: 5 * 60 * 1000,
            finished_batch_ttl_seconds: 24 * 60 * 60,
            max_queued_batches: 1000,
        }
    }

    /// Get task timeout as Duration
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_seconds)
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }

    /// Get cleanup interval as Duration
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    /// Get finished batch TTL as a chrono Duration for timestamp comparisons
    pub fn finished_batch_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.finished_batch_ttl_seconds as i64)
    }
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self::new(16)
    }
}
