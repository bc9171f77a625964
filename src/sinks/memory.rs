//! In-memory sink for tests and embedding programs

use crate::core::{LogLine, Result, Sink};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Buffer {
    lines: Mutex<Vec<String>>,
    grew: Condvar,
}

/// Collects written messages in a shared buffer
///
/// Clones share the same buffer, so a test keeps one handle and gives the
/// other to the logger.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Buffer>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message written so far, in write order
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.buffer.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, message: &str) -> bool {
        self.buffer.lines.lock().iter().any(|line| line == message)
    }

    pub fn clear(&self) {
        self.buffer.lines.lock().clear();
    }

    /// Block until at least `count` lines are buffered or `timeout` passes
    ///
    /// Returns whether the count was reached.
    pub fn wait_for_len(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut lines = self.buffer.lines.lock();
        while lines.len() < count {
            if self.buffer.grew.wait_until(&mut lines, deadline).timed_out() {
                return lines.len() >= count;
            }
        }
        true
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &LogLine) -> Result<()> {
        self.buffer.lines.lock().push(line.message().to_string());
        self.buffer.grew.notify_all();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
