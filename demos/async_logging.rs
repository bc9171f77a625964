//! Async logging example
//!
//! Demonstrates many producer threads sharing one logger, with the
//! process-wide facade and the formatting macros.
//!
//! Run with: cargo run --example async_logging

use drain_logger::prelude::*;
use drain_logger::{app, debug};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Drain Logger - Async Logging Example ===\n");

    println!("1. Multi-threaded logging through a shared instance:");
    let logger = Arc::new(
        Logger::builder()
            .queue_capacity(100)
            .sink(ConsoleSink::stdout().with_timestamps())
            .build()?,
    );
    logger.start(Severity::App)?;

    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..20 {
                    app!(logger, "Thread {} - Message {}", thread_id, i);
                    thread::sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            return Err(LoggerError::other("producer thread panicked"));
        }
    }
    logger.stop()?;
    println!("   Accepted {} lines", logger.metrics().enqueued());

    println!("\n2. Process-wide logger at DEBUG (lines carry their call site):");
    drain_logger::start(Severity::Debug)?;
    drain_logger::log(Severity::App, "hello from the global logger");
    debug!(drain_logger::global(), "verbosity is {}", drain_logger::verbosity());
    drain_logger::stop()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
