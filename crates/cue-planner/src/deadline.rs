use std::time::Duration;
use std::time::Instant;

/// Cooperative wall-clock budget for one planning call.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// `None` never expires.
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.budget.map(|b| b.saturating_sub(self.elapsed()))
    }
    pub fn expired(&self) -> bool {
        self.budget.is_some_and(|b| self.elapsed() >= b)
    }
}
