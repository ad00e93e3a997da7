//! Configuration error types.

use thiserror::Error;

/// Failure to load [`Config`](crate::config::Config) from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable with no default was not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// A variable was set but could not be used.
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue {
        /// Name of the offending variable.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}
