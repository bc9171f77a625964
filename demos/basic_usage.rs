//! Basic logger usage example
//!
//! Demonstrates severity filtering and the Start/Stop cycle on the console.
//!
//! Run with: cargo run --example basic_usage

use drain_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Drain Logger - Basic Usage Example ===\n");

    let logger = Logger::new(ConsoleSink::stdout());

    println!("1. Logging at every tier with verbosity INTERNAL:");
    logger.start(Severity::Internal)?;
    logger.fatal("This is a fatal message");
    logger.error("This is an error message");
    logger.warn("This is a warning message");
    logger.app("This is an app message");
    logger.debug("This is a debug message");
    logger.internal("This is an internal message");
    logger.stop()?;

    println!("\n2. Restarting with verbosity WARN - app, debug and internal are dropped:");
    logger.start(Severity::Warn)?;
    logger.app("App message (hidden)");
    logger.debug("Debug message (hidden)");
    logger.warn("Warning message (visible)");
    logger.error("Error message (visible)");
    logger.stop()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
