//! Logging macros for ergonomic log message formatting.
//!
//! The macros check the threshold before formatting, so a filtered call
//! never builds its message. Call-site annotation points at the macro
//! invocation.
//!
//! # Examples
//!
//! ```
//! use drain_logger::prelude::*;
//! use drain_logger::app;
//!
//! let logger = Logger::new(MemorySink::new());
//! logger.start(Severity::App).unwrap();
//!
//! let port = 8080;
//! app!(logger, "Server listening on port {}", port);
//!
//! logger.stop().unwrap();
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use drain_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use drain_logger::log;
/// log!(logger, Severity::App, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let severity = $severity;
        if logger.is_enabled(severity) {
            logger.log(severity, format!($($arg)+))
        }
    }};
}

/// Log a fatal-level message.
///
/// ```
/// # use drain_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use drain_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an application-level message.
#[macro_export]
macro_rules! app {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::App, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// ```
/// # use drain_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use drain_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an internal-level message, the most verbose tier.
#[macro_export]
macro_rules! internal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Internal, $($arg)+)
    };
}
