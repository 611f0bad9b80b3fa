//! # Hub configuration.
//!
//! Provides [`HubConfig`] centralized settings for an [`EventHub`](crate::EventHub).
//!
//! Config is used in two ways:
//! 1. **Hub creation**: `EventHub::with_config(config)` or `HubBuilder::new(config).build()`
//! 2. **Subscription defaults**: `EventHub::subscribe()` uses `config.buffer`;
//!    `EventHub::subscribe_with(policy)` overrides it for a single subscription.
//!
//! ## Sentinel values
//! - `max_subscribers = 0` → unlimited (subscribe never reports capacity errors)

use crate::policies::BufferPolicy;

/// Configuration for an event hub.
///
/// Defines:
/// - **Admission**: how many live subscriptions may exist at once
/// - **Backpressure**: default buffering policy for new subscriptions
///
/// ## Field semantics
/// - `max_subscribers`: Live subscription limit (`0` = unlimited)
/// - `buffer`: Default per-subscription [`BufferPolicy`]
///
/// ## Notes
/// All fields are public. Prefer the helper accessors to avoid sprinkling
/// sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HubConfig {
    /// Maximum number of live subscriptions.
    ///
    /// - `0` = unlimited
    /// - `n > 0` = the `n+1`-th concurrent `subscribe` fails with
    ///   `HubError::CapacityExceeded`
    ///
    /// Cancelled or dropped subscriptions free their slot immediately.
    pub max_subscribers: usize,

    /// Default buffering policy for new subscriptions.
    pub buffer: BufferPolicy,
}

impl HubConfig {
    /// Returns the subscriber limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` live subscriptions
    #[inline]
    pub fn subscriber_limit(&self) -> Option<usize> {
        if self.max_subscribers == 0 {
            None
        } else {
            Some(self.max_subscribers)
        }
    }
}
