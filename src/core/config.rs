//! Logger configuration

use super::{
    error::{LoggerError, Result},
    overflow_policy::OverflowPolicy,
    severity::Severity,
};
use serde::{Deserialize, Serialize};

/// Queue capacity used when none is configured
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Settings applied by [`Logger::from_config`](crate::Logger::from_config)
///
/// Missing fields fall back to their defaults, so `{}` is a valid document.
///
/// ```
/// use drain_logger::{LoggerConfig, Severity};
///
/// let config = LoggerConfig::from_json(r#"{ "verbosity": "WARN", "queue_capacity": 64 }"#).unwrap();
/// assert_eq!(config.verbosity, Severity::Warn);
/// assert_eq!(config.queue_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Most verbose severity written to the sink
    pub verbosity: Severity,
    /// Capacity of the bounded queue between producers and the worker
    pub queue_capacity: usize,
    pub overflow_policy: OverflowPolicy,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "queue_capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            verbosity: Severity::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}
