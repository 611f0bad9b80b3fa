//! Error types used by the hub and its subscription handles.
//!
//! This module defines two enums:
//!
//! - [`HubError`] — errors raised when registering a subscription.
//! - [`TryRecvError`] — non-blocking pull outcomes that carry no value.
//!
//! Neither is fatal to the hub. Publishing never fails, and overflow drops are
//! reported through counters rather than errors.

use thiserror::Error;

/// # Errors produced by the event hub.
///
/// Both variants are recoverable by the caller: retry later, or reject the
/// consumer that asked for a subscription.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// The configured subscriber limit has been reached.
    #[error("subscriber limit {limit} reached")]
    CapacityExceeded {
        /// The configured maximum number of live subscriptions.
        limit: usize,
    },

    /// The hub has been closed and accepts no new subscriptions.
    #[error("hub is closed")]
    Closed,
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hubcast::HubError;
    ///
    /// let err = HubError::CapacityExceeded { limit: 4 };
    /// assert_eq!(err.as_label(), "hub_capacity_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::CapacityExceeded { .. } => "hub_capacity_exceeded",
            HubError::Closed => "hub_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HubError::CapacityExceeded { limit } => {
                format!("capacity exceeded: {limit} live subscriptions")
            }
            HubError::Closed => "hub closed".to_string(),
        }
    }

    /// Indicates whether retrying `subscribe` later may succeed.
    ///
    /// Returns `true` for [`HubError::CapacityExceeded`]; a closed hub never reopens.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HubError::CapacityExceeded { .. })
    }
}

/// # Outcome of a non-blocking pull that produced no value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// The channel is open but currently has nothing buffered.
    #[error("channel empty")]
    Empty,

    /// The channel is closed and fully drained; no value will ever arrive.
    #[error("channel closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            HubError::CapacityExceeded { limit: 1 }.as_label(),
            "hub_capacity_exceeded"
        );
        assert_eq!(HubError::Closed.as_label(), "hub_closed");
    }

    #[test]
    fn test_only_capacity_is_retryable() {
        assert!(HubError::CapacityExceeded { limit: 8 }.is_retryable());
        assert!(!HubError::Closed.is_retryable());
    }

    #[test]
    fn test_display_includes_limit() {
        let err = HubError::CapacityExceeded { limit: 8 };
        assert_eq!(err.to_string(), "subscriber limit 8 reached");
        assert_eq!(err.as_message(), "capacity exceeded: 8 live subscriptions");
    }
}
