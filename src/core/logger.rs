//! Logger facade: severity filtering, call-site annotation and the
//! Start/Stop lifecycle around the queue and drain worker

use super::{
    config::{LoggerConfig, DEFAULT_QUEUE_CAPACITY},
    error::{LoggerError, Result},
    log_line::{CallSite, LogLine},
    metrics::LoggerMetrics,
    overflow_policy::OverflowPolicy,
    severity::Severity,
    sink::Sink,
    worker::{DrainWorker, SharedSink},
};
use crossbeam_channel::{bounded, SendTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout used when a running logger is dropped (5 seconds)
///
/// For explicit control, call [`Logger::stop`] or [`Logger::stop_timeout`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Emit an alert on the first fault and every 1000th after it
const ALERT_EVERY: u64 = 1000;

/// Queue write end and worker of one Start/Stop cycle
struct Cycle {
    sender: Sender<LogLine>,
    worker: DrainWorker,
}

/// Asynchronous, severity-filtered logger
///
/// `log` filters against the verbosity threshold, formats the line and
/// enqueues it; a single background worker writes queued lines to the sink
/// in order. The queue and worker only exist between [`start`](Self::start)
/// and [`stop`](Self::stop), and a new cycle may begin as soon as `stop`
/// returns.
///
/// The threshold is read with a relaxed atomic load. A `start` racing with
/// in-flight `log` calls may be observed late by those calls.
///
/// # Example
///
/// ```
/// use drain_logger::prelude::*;
///
/// let memory = MemorySink::new();
/// let logger = Logger::new(memory.clone());
///
/// logger.start(Severity::Warn).unwrap();
/// logger.log(Severity::Error, "x");
/// logger.log(Severity::App, "y");
/// logger.stop().unwrap();
///
/// assert_eq!(memory.lines(), ["x"]);
/// ```
pub struct Logger {
    verbosity: AtomicU8,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    sink: SharedSink,
    cycle: RwLock<Option<Cycle>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create an idle logger writing to `sink` with default settings
    #[must_use]
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::with_parts(
            Box::new(sink),
            Severity::default(),
            DEFAULT_QUEUE_CAPACITY,
            OverflowPolicy::default(),
        )
    }

    /// Create an idle logger from a validated configuration
    pub fn from_config(sink: impl Sink + 'static, config: &LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(
            Box::new(sink),
            config.verbosity,
            config.queue_capacity,
            config.overflow_policy,
        ))
    }

    fn with_parts(
        sink: Box<dyn Sink>,
        verbosity: Severity,
        queue_capacity: usize,
        overflow_policy: OverflowPolicy,
    ) -> Self {
        Self {
            verbosity: AtomicU8::new(verbosity.as_u8()),
            queue_capacity,
            overflow_policy,
            sink: Arc::new(Mutex::new(sink)),
            cycle: RwLock::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Begin a cycle: fresh queue, fresh worker, new verbosity
    ///
    /// Fails with [`LoggerError::AlreadyStarted`] if the previous cycle has
    /// not been stopped.
    pub fn start(&self, verbosity: Severity) -> Result<()> {
        let mut cycle = self.cycle.write();
        if cycle.is_some() {
            return Err(LoggerError::AlreadyStarted);
        }

        let (sender, receiver) = bounded(self.queue_capacity);
        let worker = DrainWorker::spawn(receiver, Arc::clone(&self.sink), Arc::clone(&self.metrics))?;
        self.set_verbosity(verbosity);

        *cycle = Some(Cycle { sender, worker });
        Ok(())
    }

    /// Begin a cycle at the currently configured verbosity
    pub fn start_configured(&self) -> Result<()> {
        self.start(self.verbosity())
    }

    /// Close the queue and block until every enqueued line has been written
    pub fn stop(&self) -> Result<()> {
        let Cycle { sender, worker } = self.take_cycle()?;
        drop(sender);
        worker.wait()
    }

    /// Like [`stop`](Self::stop) but waits at most `timeout` for the drain
    ///
    /// On timeout the cycle is still torn down; the worker finishes draining
    /// in the background.
    pub fn stop_timeout(&self, timeout: Duration) -> Result<()> {
        let Cycle { sender, worker } = self.take_cycle()?;
        drop(sender);
        worker.wait_timeout(timeout).inspect_err(|e| {
            if matches!(e, LoggerError::ShutdownTimeout(_)) {
                eprintln!(
                    "[LOGGER WARNING] Drain worker did not finish within {:?}. \
                     {} lines still pending.",
                    timeout,
                    self.metrics.pending()
                );
            }
        })
    }

    fn take_cycle(&self) -> Result<Cycle> {
        self.cycle.write().take().ok_or(LoggerError::NotStarted)
    }

    pub fn is_running(&self) -> bool {
        self.cycle.read().is_some()
    }

    #[inline]
    pub fn verbosity(&self) -> Severity {
        Severity::from_u8(self.verbosity.load(Ordering::Relaxed))
    }

    pub fn set_verbosity(&self, verbosity: Severity) {
        self.verbosity.store(verbosity.as_u8(), Ordering::Relaxed);
    }

    /// Whether a line of `severity` would currently be written
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_enabled_at(self.verbosity())
    }

    /// Replace the sink; lines drained after this call go to the new one
    pub fn set_sink(&self, sink: impl Sink + 'static) {
        let mut previous = std::mem::replace(&mut *self.sink.lock(), Box::new(sink));
        if let Err(e) = previous.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush replaced sink '{}': {}", previous.name(), e);
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    /// Get the logger metrics for observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log a line attributed to the caller's source location
    ///
    /// Never fails. Filtered lines are dropped silently; calls outside an
    /// active cycle are counted in [`LoggerMetrics::rejected`] and reported
    /// on stderr.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.log_at(severity, message, CallSite::caller());
    }

    /// Log a line with an explicitly supplied call site
    pub fn log_at(&self, severity: Severity, message: impl Into<String>, site: CallSite) {
        if let Err(e) = self.try_log_at(severity, message, site) {
            self.report_fault(&e);
        }
    }

    /// Fallible variant of [`log`](Self::log)
    #[track_caller]
    pub fn try_log(&self, severity: Severity, message: impl Into<String>) -> Result<()> {
        self.try_log_at(severity, message, CallSite::caller())
    }

    pub fn try_log_at(
        &self,
        severity: Severity,
        message: impl Into<String>,
        site: CallSite,
    ) -> Result<()> {
        let verbosity = self.verbosity();
        if !severity.is_enabled_at(verbosity) {
            return Ok(());
        }

        let line = if verbosity.annotates_call_site() {
            let message: String = message.into();
            LogLine::annotated(severity, &message, &site)
        } else {
            LogLine::new(severity, message)
        };
        self.enqueue(line)
    }

    fn enqueue(&self, line: LogLine) -> Result<()> {
        let cycle = self.cycle.read();
        let sender = match cycle.as_ref() {
            Some(cycle) => &cycle.sender,
            None => return Err(LoggerError::NotStarted),
        };

        match sender.try_send(line) {
            Ok(()) => {}
            Err(TrySendError::Full(line)) => {
                self.metrics.record_queue_full();
                self.handle_overflow(sender, line)?;
            }
            Err(TrySendError::Disconnected(_)) => return Err(LoggerError::QueueClosed),
        }

        self.metrics.record_enqueued();
        Ok(())
    }

    /// Apply the overflow policy to a line that found the queue full
    fn handle_overflow(&self, sender: &Sender<LogLine>, line: LogLine) -> Result<()> {
        match self.overflow_policy {
            OverflowPolicy::Block => sender.send(line).map_err(|_| LoggerError::QueueClosed),
            OverflowPolicy::BlockWithTimeout(timeout) => match sender.send_timeout(line, timeout) {
                Ok(()) => Ok(()),
                Err(SendTimeoutError::Timeout(_)) => {
                    self.metrics.record_dropped();
                    Err(LoggerError::queue_full(self.queue_capacity))
                }
                Err(SendTimeoutError::Disconnected(_)) => Err(LoggerError::QueueClosed),
            },
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped();
                Err(LoggerError::queue_full(self.queue_capacity))
            }
        }
    }

    fn report_fault(&self, error: &LoggerError) {
        let count = match error {
            LoggerError::QueueFull { .. } => self.metrics.dropped(),
            _ => self.metrics.record_rejected() + 1,
        };

        if count == 1 || count % ALERT_EVERY == 0 {
            match error {
                LoggerError::QueueFull { .. } => eprintln!(
                    "[LOGGER WARNING] Queue full, {} lines dropped under {} policy.",
                    count, self.overflow_policy
                ),
                _ => eprintln!(
                    "[LOGGER WARNING] Log call rejected ({}), {} rejected so far.",
                    error, count
                ),
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Severity::Fatal, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn app(&self, message: impl Into<String>) {
        self.log(Severity::App, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn internal(&self, message: impl Into<String>) {
        self.log(Severity::Internal, message);
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use drain_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .verbosity(Severity::Debug)
    ///     .queue_capacity(64)
    ///     .sink(MemorySink::new())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.verbosity(), Severity::Debug);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(Cycle { sender, worker }) = self.cycle.get_mut().take() {
            drop(sender);
            if let Err(e) = worker.wait_timeout(DEFAULT_SHUTDOWN_TIMEOUT) {
                eprintln!("[LOGGER ERROR] Logger dropped while running: {}", e);
            }
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Without a sink the logger writes to stderr through
/// [`ConsoleSink`](crate::sinks::ConsoleSink).
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
        }
    }

    /// Replace every setting with `config`
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial verbosity, used by [`Logger::start_configured`]
    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, verbosity: Severity) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Set the policy applied when the queue is full
    ///
    /// Default is [`OverflowPolicy::Block`].
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the Logger; fails if the configuration is invalid
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;
        let sink = self
            .sink
            .unwrap_or_else(|| -> Box<dyn Sink> { Box::new(crate::sinks::ConsoleSink::stderr()) });
        Ok(Logger::with_parts(
            sink,
            self.config.verbosity,
            self.config.queue_capacity,
            self.config.overflow_policy,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
