//! Error types for the logger system

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (configuration) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unrecognized severity token
    #[error("Invalid severity: '{0}'")]
    InvalidSeverity(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// No Start/Stop cycle is active
    #[error("Logger not started")]
    NotStarted,

    /// Start called while a cycle is still active
    #[error("Logger already started")]
    AlreadyStarted,

    /// Queue was closed before the line could be enqueued
    #[error("Log queue closed")]
    QueueClosed,

    /// Queue full and the overflow policy refused to wait
    #[error("Log queue full: {capacity} lines buffered")]
    QueueFull { capacity: usize },

    /// The drain worker thread could not be spawned
    #[error("Failed to spawn drain worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The drain worker exited without signalling completion
    #[error("Drain worker panicked before completing")]
    WorkerPanicked,

    /// The drain worker did not finish within the allotted time
    #[error("Drain worker did not finish within {0:?}")]
    ShutdownTimeout(Duration),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    pub fn invalid_severity(token: impl Into<String>) -> Self {
        LoggerError::InvalidSeverity(token.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn queue_full(capacity: usize) -> Self {
        LoggerError::QueueFull { capacity }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
