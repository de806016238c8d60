//! Bounded retry for one dispatch.

use std::time::Duration;

/// How many sends one cue gets and how long to wait between them.
///
/// Pure over attempt counts: the dispatcher owns the actual sleeping and
/// sending, this type only answers "is another attempt allowed".
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Whether another attempt is allowed after `attempts_made` sends.
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

impl Default for RetryPolicy {
    /// Default: 2 attempts total, 1 second apart.
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_secs(1),
        }
    }
}
