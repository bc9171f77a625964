//! Background drain worker
//!
//! One worker runs per Start/Stop cycle. It owns the read end of the queue,
//! writes every line to the sink in FIFO order, and fires a one-shot
//! completion signal once the queue is closed and empty.

use super::{
    error::{LoggerError, Result},
    log_line::LogLine,
    metrics::LoggerMetrics,
    sink::Sink,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Sink shared between the logger (for replacement) and the running worker
pub type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

pub const WORKER_THREAD_NAME: &str = "drain-logger";

/// Handle to a running drain worker
///
/// Dropping the handle without waiting detaches the thread; it still drains
/// the queue once every producer handle is gone.
pub struct DrainWorker {
    handle: Option<JoinHandle<()>>,
    done: Receiver<()>,
}

impl DrainWorker {
    pub fn spawn(
        receiver: Receiver<LogLine>,
        sink: SharedSink,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let (done_tx, done_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                Self::drain(&receiver, &sink, &metrics);
                // Only send on the signal; capacity 1 never blocks here.
                let _ = done_tx.send(());
            })
            .map_err(LoggerError::WorkerSpawn)?;

        Ok(Self {
            handle: Some(handle),
            done: done_rx,
        })
    }

    /// Write lines until the queue is closed and drained, then flush
    fn drain(receiver: &Receiver<LogLine>, sink: &SharedSink, metrics: &LoggerMetrics) {
        for line in receiver.iter() {
            let mut sink = sink.lock();
            let result = catch_unwind(AssertUnwindSafe(|| sink.write_line(&line)));

            match result {
                Ok(Ok(())) => {
                    metrics.record_written();
                }
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
                    metrics.record_write_failure();
                }
                Err(payload) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. Draining continues.",
                        sink.name(),
                        panic_message(payload.as_ref())
                    );
                    metrics.record_write_failure();
                }
            }
        }

        let mut sink = sink.lock();
        match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            }
            Err(payload) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked during flush: {}",
                    sink.name(),
                    panic_message(payload.as_ref())
                );
            }
        }
    }

    /// True once the worker thread has exited, or after it has been joined
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the completion signal fires, then reap the thread
    pub fn wait(mut self) -> Result<()> {
        match self.done.recv() {
            Ok(()) => self.join(),
            Err(_) => {
                let _ = self.join();
                Err(LoggerError::WorkerPanicked)
            }
        }
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`
    ///
    /// On timeout the thread is detached and keeps draining in the background.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<()> {
        match self.done.recv_timeout(timeout) {
            Ok(()) => self.join(),
            Err(RecvTimeoutError::Timeout) => Err(LoggerError::ShutdownTimeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                let _ = self.join();
                Err(LoggerError::WorkerPanicked)
            }
        }
    }

    fn join(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|payload| {
                eprintln!(
                    "[LOGGER ERROR] Drain worker panicked: {}",
                    panic_message(payload.as_ref())
                );
                LoggerError::WorkerPanicked
            }),
            None => Ok(()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity::Severity;
    use crate::sinks::MemorySink;

    fn shared(sink: impl Sink + 'static) -> SharedSink {
        Arc::new(Mutex::new(Box::new(sink)))
    }

    #[test]
    fn test_drains_in_order_then_signals() {
        let memory = MemorySink::new();
        let metrics = Arc::new(LoggerMetrics::new());
        let (tx, rx) = crossbeam_channel::bounded(4);

        let worker = DrainWorker::spawn(rx, shared(memory.clone()), Arc::clone(&metrics)).unwrap();
        for i in 0..20 {
            tx.send(LogLine::new(Severity::Error, format!("line {}", i))).unwrap();
        }
        drop(tx);

        worker.wait().unwrap();

        let expected: Vec<String> = (0..20).map(|i| format!("line {}", i)).collect();
        assert_eq!(memory.lines(), expected);
        assert_eq!(metrics.written(), 20);
    }

    #[test]
    fn test_keeps_draining_after_sink_failure() {
        struct FlakySink {
            calls: usize,
            out: MemorySink,
        }

        impl Sink for FlakySink {
            fn write_line(&mut self, line: &LogLine) -> Result<()> {
                self.calls += 1;
                match self.calls {
                    2 => Err(LoggerError::writer("disk full")),
                    3 => panic!("sink exploded"),
                    _ => self.out.write_line(line),
                }
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "flaky"
            }
        }

        let out = MemorySink::new();
        let metrics = Arc::new(LoggerMetrics::new());
        let (tx, rx) = crossbeam_channel::bounded(8);
        let sink = FlakySink {
            calls: 0,
            out: out.clone(),
        };

        let worker = DrainWorker::spawn(rx, shared(sink), Arc::clone(&metrics)).unwrap();
        for msg in ["a", "b", "c", "d"] {
            tx.send(LogLine::new(Severity::Error, msg)).unwrap();
        }
        drop(tx);
        worker.wait().unwrap();

        assert_eq!(out.lines(), ["a", "d"]);
        assert_eq!(metrics.written(), 2);
        assert_eq!(metrics.write_failures(), 2);
    }

    #[test]
    fn test_wait_timeout_while_queue_open() {
        let (tx, rx) = crossbeam_channel::bounded::<LogLine>(1);
        let worker = DrainWorker::spawn(
            rx,
            shared(MemorySink::new()),
            Arc::new(LoggerMetrics::new()),
        )
        .unwrap();

        assert!(!worker.is_finished());
        let err = worker.wait_timeout(Duration::from_millis(20)).unwrap_err();
        assert!(matches!(err, LoggerError::ShutdownTimeout(_)));

        // Closing the queue lets the detached worker exit.
        drop(tx);
    }
}
