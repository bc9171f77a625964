//! Process-wide logger for programs that want a single shared instance
//!
//! The instance is created on first use with a stderr [`ConsoleSink`] and
//! otherwise behaves exactly like a [`Logger`] owned by the caller. Start
//! and stop should be driven from one place in the embedding program.

use super::{error::Result, logger::Logger, severity::Severity, sink::Sink};
use crate::sinks::ConsoleSink;
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::new(ConsoleSink::stderr()))
}

pub fn start(verbosity: Severity) -> Result<()> {
    global().start(verbosity)
}

pub fn stop() -> Result<()> {
    global().stop()
}

#[track_caller]
pub fn log(severity: Severity, message: impl Into<String>) {
    global().log(severity, message);
}

pub fn set_verbosity(verbosity: Severity) {
    global().set_verbosity(verbosity);
}

pub fn verbosity() -> Severity {
    global().verbosity()
}

pub fn set_sink(sink: impl Sink + 'static) {
    global().set_sink(sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    // The only test touching the global instance, so no cross-test races.
    #[test]
    fn test_global_cycle() {
        let memory = MemorySink::new();
        set_sink(memory.clone());

        for _ in 0..3 {
            start(Severity::Error).unwrap();
            log(Severity::Error, "bad");
            log(Severity::Warn, "filtered");
            stop().unwrap();
        }

        assert_eq!(verbosity(), Severity::Error);
        assert_eq!(memory.lines(), ["bad", "bad", "bad"]);
    }
}
