use std::time::Duration;

use tokio::time::Instant;

/// Bounds for a polling loop. `None` on both sides never expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            timeout: None,
        }
    }
}

/// Live attempt counter for one run of a polling loop
#[derive(Debug)]
pub struct RetryBudget {
    policy: RetryPolicy,
    attempts: u32,
    started: Instant,
}

impl RetryBudget {
    pub fn start(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
            started: Instant::now(),
        }
    }

    /// Take one attempt; `false` once the attempt limit or the deadline is hit
    pub fn try_consume(&mut self) -> bool {
        if self.policy.max_attempts.is_some_and(|max| self.attempts >= max) {
            return false;
        }
        if self.policy.timeout.is_some_and(|t| self.elapsed() >= t) {
            return false;
        }
        self.attempts += 1;
        true
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
