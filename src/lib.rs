//! # Drain Logger
//!
//! Asynchronous, severity-filtered logging. Producers filter and format on
//! their own thread, then hand lines to a bounded queue; a single background
//! worker writes them to a sink in order.
//!
//! ## Features
//!
//! - **Six severity tiers**: `FATAL`, `ERROR`, `WARN`, `APP`, `DEBUG`, `INTERNAL`
//! - **Cheap filtering**: one relaxed atomic load per rejected call
//! - **Backpressure**: a full queue blocks producers instead of losing lines
//! - **Graceful stop**: `stop` returns only once every accepted line is written
//! - **Call-site annotation**: `[file:line] ` prefixes at debug verbosity
//!
//! ```
//! use drain_logger::prelude::*;
//!
//! let memory = MemorySink::new();
//! let logger = Logger::new(memory.clone());
//!
//! logger.start(Severity::Error)?;
//! logger.error("disk full");
//! logger.stop()?;
//!
//! assert_eq!(memory.lines(), ["disk full"]);
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, LogLine, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        OverflowPolicy, Result, Severity, Sink, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
}

pub use crate::core::global::{global, log, set_sink, set_verbosity, start, stop, verbosity};
pub use crate::core::{
    CallSite, DrainWorker, LogLine, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, OverflowPolicy, Result, Severity, Sink, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use sinks::{ConsoleSink, MemorySink, WriterSink};
#[cfg(feature = "file")]
pub use sinks::FileSink;
