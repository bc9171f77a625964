//! Core logger types and traits

pub mod config;
pub mod error;
pub mod global;
pub mod log_line;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod severity;
pub mod sink;
pub mod worker;

pub use config::{LoggerConfig, DEFAULT_QUEUE_CAPACITY};
pub use error::{LoggerError, Result};
pub use log_line::{CallSite, LogLine};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use severity::Severity;
pub use sink::Sink;
pub use worker::DrainWorker;
