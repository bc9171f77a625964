//! File logging example
//!
//! Demonstrates draining log lines into an append-mode file.
//!
//! Run with: cargo run --example file_logging

use drain_logger::prelude::*;
use drain_logger::FileSink;

fn main() -> Result<()> {
    println!("=== Drain Logger - File Logging Example ===\n");

    let logger = Logger::new(FileSink::new("application.log")?);
    logger.start(Severity::App)?;

    logger.app("Application started");
    logger.debug("Loading configuration...");
    logger.app("Configuration loaded successfully");
    logger.warn("Using default settings for some options");

    for i in 1..=5 {
        logger.app(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }

    logger.error("Failed to load optional plugin");
    logger.app("All operations completed");

    // Stop drains the queue and flushes the file.
    logger.stop()?;

    println!("Check 'application.log' for the full log output");

    Ok(())
}
