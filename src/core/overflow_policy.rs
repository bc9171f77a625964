//! Overflow policies for the bounded log queue
//!
//! When the queue is full, the policy decides whether a producer waits for
//! the drain worker to make room or gives the line up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Policy for handling a full queue
///
/// # Example
///
/// ```
/// use drain_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// // Default behavior: backpressure
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
///
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// assert!(policy.may_drop());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Block the producer until the worker frees a slot
    ///
    /// No line is ever lost, at the cost of stalling fast producers behind a
    /// slow sink.
    #[default]
    Block,

    /// Block for at most the given duration, then drop and count the line
    BlockWithTimeout(Duration),

    /// Drop and count the line immediately
    DropNewest,
}

impl OverflowPolicy {
    /// Whether this policy can lose accepted lines
    pub fn may_drop(&self) -> bool {
        !matches!(self, OverflowPolicy::Block)
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
        }
    }
}
