//! Wall-clock budget shared by every search of one diff computation.

use std::time::{Duration, Instant};
use thiserror::Error;

/// Returned by any search that stopped because its [`Deadline`] elapsed.
///
/// This is not "nothing in common": the search simply did not finish.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("time budget exhausted before the search completed")]
pub struct DeadlineExceeded;

/// A fixed cutoff established once per top-level diff call.
///
/// The deadline is read-only after creation. Every recursion level and every
/// alignment loop borrows the same instance.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start the clock now with the given budget.
    #[must_use]
    pub fn starting_now(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// Start the clock now with a budget in (fractional) seconds.
    ///
    /// Negative and non-finite values are clamped: a non-positive budget
    /// expires immediately and an infinite one never does.
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        let budget = if secs.is_nan() || secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        };
        Self::starting_now(budget)
    }

    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.budget
    }

    /// `Err(DeadlineExceeded)` once the budget is spent.
    pub fn check(&self) -> Result<(), DeadlineExceeded> {
        if self.is_expired() {
            Err(DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generous_budget_not_expired() {
        let deadline = Deadline::starting_now(Duration::from_secs(60));
        assert!(!deadline.is_expired());
        assert!(deadline.check().is_ok());
    }

    #[test]
    fn test_zero_budget_expires() {
        let deadline = Deadline::starting_now(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(deadline.is_expired());
        assert_eq!(deadline.check(), Err(DeadlineExceeded));
    }

    #[test]
    fn test_from_secs_clamps_bad_values() {
        assert_eq!(Deadline::from_secs_f64(-1.0).budget(), Duration::ZERO);
        assert_eq!(Deadline::from_secs_f64(f64::NAN).budget(), Duration::ZERO);
        assert_eq!(Deadline::from_secs_f64(f64::INFINITY).budget(), Duration::MAX);
        assert_eq!(
            Deadline::from_secs_f64(1.5).budget(),
            Duration::from_millis(1500)
        );
    }
}
