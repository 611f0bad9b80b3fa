//! # Consumer lifecycle states and run summary.
//!
//! ```text
//! Idle ──► Subscribed ──► Pulling ⇄ Delivering
//!                            │
//!                            ├─► Draining ──► Closed   (hub closed: flush buffer first)
//!                            └─────────────► Closed   (cancelled / channel drained)
//! ```
//!
//! `Closed` is terminal: no handler invocation happens after it is entered.

/// Lifecycle state of one [`SequentialConsumer`](crate::SequentialConsumer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerState {
    /// Constructed, not yet registered with the hub.
    Idle,
    /// Subscription registered; the pull loop has not started.
    Subscribed,
    /// Waiting for the next value on an open channel.
    Pulling,
    /// Awaiting the handler for one value.
    Delivering,
    /// Channel closed by the hub; flushing the values still buffered.
    Draining,
    /// Terminal.
    Closed,
}

impl ConsumerState {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConsumerState::Idle => "idle",
            ConsumerState::Subscribed => "subscribed",
            ConsumerState::Pulling => "pulling",
            ConsumerState::Delivering => "delivering",
            ConsumerState::Draining => "draining",
            ConsumerState::Closed => "closed",
        }
    }

    /// Returns `true` for [`ConsumerState::Closed`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConsumerState::Closed)
    }
}

/// Summary of a finished consumer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    /// Values whose handler call completed normally.
    pub handled: u64,
    /// Values whose handler call panicked.
    pub panicked: u64,
    /// `true` if the run ended through its cancellation token.
    pub cancelled: bool,
    /// Values dropped for this consumer's subscription by its buffer policy.
    pub overflowed: u64,
}

impl ConsumerReport {
    /// Total handler invocations.
    pub fn delivered(&self) -> u64 {
        self.handled + self.panicked
    }
}
