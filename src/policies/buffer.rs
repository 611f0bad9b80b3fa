//! # Buffering policies for subscriber channels.
//!
//! [`BufferPolicy`] determines how many undelivered values a single
//! subscription may hold, and what happens to a value that does not fit.
//!
//! - [`BufferPolicy::Unbounded`] every value is buffered until pulled (default).
//! - [`BufferPolicy::DropNewest`] at most `capacity` values are buffered; an
//!   incoming value that finds the buffer full is dropped for that subscriber
//!   only and counted.
//!
//! ## Choosing the right policy
//!
//! **Consumers that must see everything** (accumulators, audit):
//! ```text
//! BufferPolicy::Unbounded              → memory grows with consumer lag
//! ```
//!
//! **Consumers that may shed load** (previews, metrics):
//! ```text
//! BufferPolicy::DropNewest {
//!     capacity: n                      → at most n values wait; overflow is counted
//! }
//! ```
//!
//! The publisher is never blocked by either policy.

/// Policy controlling how a subscription buffers values it has not pulled yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferPolicy {
    /// Buffer every value until pulled (default).
    #[default]
    Unbounded,
    /// Buffer at most `capacity` values; drop incoming values while full.
    ///   - Already-buffered values are never evicted.
    ///   - Each dropped value increments the subscription's overflow counter.
    ///   - `capacity` is clamped to a minimum of 1.
    DropNewest { capacity: usize },
}

impl BufferPolicy {
    /// Shorthand for [`BufferPolicy::DropNewest`].
    pub fn drop_newest(capacity: usize) -> Self {
        BufferPolicy::DropNewest { capacity }
    }

    /// Returns the buffer bound as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` (>= 1) buffered values
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        match self {
            BufferPolicy::Unbounded => None,
            BufferPolicy::DropNewest { capacity } => Some((*capacity).max(1)),
        }
    }

    /// Returns `true` when the policy may drop values.
    #[inline]
    pub fn is_lossy(&self) -> bool {
        self.capacity().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(BufferPolicy::default(), BufferPolicy::Unbounded);
        assert_eq!(BufferPolicy::default().capacity(), None);
        assert!(!BufferPolicy::default().is_lossy());
    }

    #[test]
    fn test_zero_capacity_clamped_to_one() {
        assert_eq!(BufferPolicy::drop_newest(0).capacity(), Some(1));
    }

    #[test]
    fn test_drop_newest_is_lossy() {
        let policy = BufferPolicy::drop_newest(16);
        assert_eq!(policy.capacity(), Some(16));
        assert!(policy.is_lossy());
    }
}
