//! Stress tests for the bounded queue and drain worker
//!
//! These tests verify:
//! - No line is lost or duplicated under concurrent producers
//! - Backpressure blocks producers instead of dropping when the queue is full
//! - Repeated Start/Stop cycles under load stay independent
//! - Stop during a burst keeps exactly the lines that were accepted

use drain_logger::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// 10 producers, 1000+ lines, then stop: exactly the accepted lines arrive
#[test]
fn test_concurrent_producers_no_loss_no_duplicates() {
    const PRODUCERS: usize = 10;
    const PER_PRODUCER: usize = 150;

    let memory = MemorySink::new();
    let logger = Arc::new(Logger::new(memory.clone()));
    logger.start(Severity::Error).expect("start");

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    logger.log(Severity::Error, format!("p{}-{}", producer, i));
                    // Interleave filtered traffic.
                    logger.log(Severity::Debug, "filtered");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.stop().expect("stop");

    let lines = memory.lines();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);

    let unique: HashSet<&String> = lines.iter().collect();
    assert_eq!(unique.len(), lines.len(), "duplicate lines delivered");
    assert!(!lines.iter().any(|line| line == "filtered"));
    assert_eq!(logger.metrics().enqueued(), (PRODUCERS * PER_PRODUCER) as u64);
    assert_eq!(logger.metrics().dropped(), 0);
}

/// A slow sink behind a tiny queue must stall producers, not drop lines
#[test]
fn test_backpressure_blocks_instead_of_dropping() {
    struct SlowSink {
        out: MemorySink,
        writes: Arc<AtomicUsize>,
    }

    impl Sink for SlowSink {
        fn write_line(&mut self, line: &LogLine) -> Result<()> {
            thread::sleep(Duration::from_millis(1));
            self.writes.fetch_add(1, Ordering::Relaxed);
            self.out.write_line(line)
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    let memory = MemorySink::new();
    let writes = Arc::new(AtomicUsize::new(0));
    let logger = Logger::builder()
        .queue_capacity(2)
        .overflow_policy(OverflowPolicy::Block)
        .sink(SlowSink {
            out: memory.clone(),
            writes: Arc::clone(&writes),
        })
        .build()
        .expect("build");
    logger.start(Severity::Error).expect("start");

    for i in 0..100 {
        logger.error(format!("Message {}", i));
        // Producer can never run more than the queue (plus the line in hand)
        // ahead of the sink.
        let written = writes.load(Ordering::Relaxed);
        assert!(i + 1 - written <= 4, "producer ran {} lines ahead", i + 1 - written);
    }
    logger.stop().expect("stop");

    assert_eq!(memory.len(), 100);
    assert!(logger.metrics().queue_full_events() > 0);
    assert_eq!(logger.metrics().dropped(), 0);
}

/// Every cycle under load is fully drained by its own stop
#[test]
fn test_repeated_cycles_under_load() {
    let memory = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .queue_capacity(16)
            .sink(memory.clone())
            .build()
            .expect("build"),
    );

    for cycle in 0..6 {
        logger.start(Severity::Error).expect("start");

        let handles: Vec<_> = (0..4)
            .map(|producer| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..50 {
                        logger.error(format!("c{}-p{}-{}", cycle, producer, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        logger.stop().expect("stop");

        let lines = memory.lines();
        assert_eq!(lines.len(), 200 * (cycle + 1));
        let tag = format!("c{}-", cycle);
        assert_eq!(lines.iter().filter(|line| line.starts_with(&tag)).count(), 200);
    }
}

/// Stop racing live producers: every accepted line arrives, nothing else does
#[test]
fn test_stop_mid_burst_keeps_accepted_lines() {
    const PRODUCERS: usize = 8;
    const MAX_PER_PRODUCER: usize = 5000;

    for round in 0..20 {
        let memory = MemorySink::new();
        let logger = Arc::new(
            Logger::builder()
                .queue_capacity(4)
                .sink(memory.clone())
                .build()
                .expect("build"),
        );
        logger.start(Severity::Error).expect("start");

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    let mut accepted = 0;
                    for i in 0..MAX_PER_PRODUCER {
                        match logger.try_log(Severity::Error, format!("p{}-{}", producer, i)) {
                            Ok(()) => accepted += 1,
                            Err(LoggerError::NotStarted) => break,
                            Err(e) => panic!("unexpected error: {}", e),
                        }
                    }
                    accepted
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(2));
        logger.stop().expect("stop");

        let accepted: Vec<usize> = handles
            .into_iter()
            .map(|handle| handle.join().expect("Thread panicked"))
            .collect();

        let lines = memory.lines();
        assert_eq!(
            lines.len(),
            accepted.iter().sum::<usize>(),
            "round {}: sink does not match accepted lines",
            round
        );

        // Each producer's accepted lines form an in-order prefix.
        for (producer, &count) in accepted.iter().enumerate() {
            let tag = format!("p{}-", producer);
            let got: Vec<&String> = lines.iter().filter(|line| line.starts_with(&tag)).collect();
            let expected: Vec<String> = (0..count).map(|i| format!("p{}-{}", producer, i)).collect();
            assert_eq!(got, expected.iter().collect::<Vec<_>>(), "round {}", round);
        }
    }
}
