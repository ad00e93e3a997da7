//! Environment configuration.

use crate::{error::config::ConfigError, worker::WorkerPoolConfig};

const DEFAULT_MAX_CONCURRENT_TASKS: usize = 16;
const DEFAULT_TASK_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_MAX_QUEUED_BATCHES: usize = 1000;

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Connection string of the database holding entity records (`DATABASE_URL`).
    pub database_url: String,
    /// Tasks executing at once across all batches (`SYNC_MAX_CONCURRENT_TASKS`).
    pub max_concurrent_tasks: usize,
    /// Per-task timeout in seconds (`SYNC_TASK_TIMEOUT_SECONDS`).
    pub task_timeout_seconds: u64,
    /// Batches that may wait in the queue (`SYNC_MAX_QUEUED_BATCHES`).
    pub max_queued_batches: usize,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - `DATABASE_URL` is set and every optional variable parses
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - An optional variable is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `var`, which returns the value of a variable if set.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            var("DATABASE_URL").ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".into()))?;

        Ok(Self {
            database_url,
            max_concurrent_tasks: parse_positive(
                &var,
                "SYNC_MAX_CONCURRENT_TASKS",
                DEFAULT_MAX_CONCURRENT_TASKS,
            )?,
            task_timeout_seconds: parse_positive(
                &var,
                "SYNC_TASK_TIMEOUT_SECONDS",
                DEFAULT_TASK_TIMEOUT_SECONDS,
            )?,
            max_queued_batches: parse_positive(
                &var,
                "SYNC_MAX_QUEUED_BATCHES",
                DEFAULT_MAX_QUEUED_BATCHES,
            )?,
        })
    }

    /// Worker pool configuration derived from these settings.
    pub fn worker_pool_config(&self) -> WorkerPoolConfig {
        let mut config = WorkerPoolConfig::new(self.max_concurrent_tasks);
        config.task_timeout_seconds = self.task_timeout_seconds;
        config.max_queued_batches = self.max_queued_batches;
        config
    }
}

fn parse_positive<F, T>(var: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = var(key) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: key.to_string(),
            reason: e.to_string(),
        })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidEnvValue {
            var: key.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(value)
}
