//! Sink trait for log output destinations

use super::{error::Result, log_line::LogLine};

/// Destination the drain worker writes rendered lines to.
///
/// Only the worker thread calls into a sink while a cycle is running, so
/// implementations need `Send` but not `Sync`.
pub trait Sink: Send {
    /// Write the line's message followed by a line terminator
    fn write_line(&mut self, line: &LogLine) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_line(&mut self, line: &LogLine) -> Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
