use std::time::{Duration, Instant};

/// A point on the monotonic clock after which a computation must stop
/// searching and settle for a valid, possibly non-minimal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now. Budgets too large for the clock never expire.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline at a fixed instant.
    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    /// A deadline that never expires.
    pub fn never() -> Self {
        Self { at: None }
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    /// Time left, or `None` for an unbounded deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Carve out a sub-deadline giving one of `parts` pending calls an
    /// equal share of the time left. Never later than `self`.
    pub fn share(&self, parts: usize) -> Deadline {
        let Some(at) = self.at else {
            return *self;
        };
        if parts <= 1 {
            return *self;
        }
        let now = Instant::now();
        let remaining = at.saturating_duration_since(now);
        let parts = u32::try_from(parts).unwrap_or(u32::MAX);
        Deadline::at(now + remaining / parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_does_not_expire() {
        let deadline = Deadline::never();
        assert!(!deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
        assert_eq!(deadline.share(4), deadline);
    }

    #[test]
    fn test_past_instant_is_expired() {
        let deadline = Deadline::at(Instant::now());
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_huge_budget_never_expires() {
        let deadline = Deadline::after(Duration::MAX);
        assert!(!deadline.is_expired());
    }

    #[test]
    fn test_share_is_not_later_than_parent() {
        let parent = Deadline::after(Duration::from_secs(60));
        let child = parent.share(3);
        let parent_left = parent.remaining().unwrap();
        let child_left = child.remaining().unwrap();
        assert!(child_left <= parent_left);
        assert!(child_left <= Duration::from_secs(21));
    }
}
