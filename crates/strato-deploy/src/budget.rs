//! Timeout budgets for bounded remote calls.
//!
//! A [`TimeoutBudget`] is a deadline derived from a clock plus a fixed
//! duration. It bounds exactly one deploy attempt: created fresh per
//! attempt, discarded after. The clock is injected so budget logic is
//! deterministic in tests.

use chrono::{DateTime, Duration, Utc};
use std::sync::{PoisonError, RwLock};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually-advanced clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A deadline bounding one remote call attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutBudget {
    created_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl TimeoutBudget {
    /// Creates a budget of `duration` starting at the clock's current time.
    #[must_use]
    pub fn new(clock: &dyn Clock, duration: Duration) -> Self {
        let created_at = clock.now();
        Self {
            created_at,
            deadline: created_at + duration,
        }
    }

    /// Returns the absolute deadline.
    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the total budget duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.deadline - self.created_at
    }

    /// Returns the time left before the deadline, clamped to zero.
    #[must_use]
    pub fn remaining(&self, clock: &dyn Clock) -> Duration {
        (self.deadline - clock.now()).max(Duration::zero())
    }

    /// Returns true once the deadline has passed.
    #[must_use]
    pub fn expired(&self, clock: &dyn Clock) -> bool {
        clock.now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn fresh_budget_is_not_expired() {
        let clock = ManualClock::new(epoch());
        let budget = TimeoutBudget::new(&clock, Duration::seconds(60));

        assert!(!budget.expired(&clock));
        assert_eq!(budget.remaining(&clock), Duration::seconds(60));
        assert_eq!(budget.duration(), Duration::seconds(60));
    }

    #[test]
    fn budget_expires_when_clock_passes_deadline() {
        let clock = ManualClock::new(epoch());
        let budget = TimeoutBudget::new(&clock, Duration::seconds(60));

        clock.advance(Duration::seconds(59));
        assert!(!budget.expired(&clock));
        assert_eq!(budget.remaining(&clock), Duration::seconds(1));

        clock.advance(Duration::seconds(1));
        assert!(budget.expired(&clock));
    }

    #[test]
    fn remaining_clamps_to_zero_after_expiry() {
        let clock = ManualClock::new(epoch());
        let budget = TimeoutBudget::new(&clock, Duration::seconds(10));

        clock.advance(Duration::seconds(30));
        assert_eq!(budget.remaining(&clock), Duration::zero());
    }

    #[test]
    fn budgets_are_independent_per_attempt() {
        let clock = ManualClock::new(epoch());
        let first = TimeoutBudget::new(&clock, Duration::seconds(60));

        clock.advance(Duration::seconds(120));
        let second = TimeoutBudget::new(&clock, Duration::seconds(60));

        assert!(first.expired(&clock));
        assert!(!second.expired(&clock));
    }
}
