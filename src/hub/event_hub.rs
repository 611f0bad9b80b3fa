//! # EventHub: synchronous publish, per-subscriber ordered delivery.
//!
//! [`EventHub`] owns a table of subscriber channels and copies every published
//! value into each channel that is open at the instant of the call.
//!
//! ## Architecture
//! ```text
//! publish(v)                      (any thread, never waits on consumers)
//!     │  lock(table) ─► seq += 1
//!     ├────────────────► [channel S1] ─► handle S1 .recv()
//!     ├────────────────► [channel S2] ─► handle S2 .recv()
//!     └────────────────► [channel SN] ─► handle SN .recv()
//!     │  unlock(table)
//! ```
//!
//! ## Rules
//! - **Serialized publish**: every `publish` runs under the table lock and gets
//!   a hub-wide sequence number there, so all subscribers see values in one
//!   relative order even with many concurrent publishers.
//! - **No replay**: a subscription sees only values published after
//!   `subscribe` returned.
//! - **Isolation**: a full or slow channel affects only its own subscriber.
//! - **Bounded publish cost**: O(live subscriptions), no awaiting.
//!
//! ## Shutdown
//! [`EventHub::close`] (or dropping the last hub clone) closes every channel in
//! drain mode: consumers still receive everything already buffered, then see
//! end-of-sequence. A closed hub refuses new subscriptions with
//! [`HubError::Closed`].

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use super::channel::{self, Channel, CloseMode, Push};
use super::{Envelope, SubscriptionHandle, SubscriptionId};
use crate::core::{HubBuilder, HubConfig};
use crate::error::HubError;
use crate::policies::BufferPolicy;

/// Point-in-time counters of a hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Live subscriptions.
    pub subscribers: usize,
    /// Number of `publish` calls so far (also the last sequence number).
    pub published: u64,
    /// Values dropped by bounded buffers, across live and removed subscriptions.
    pub dropped: u64,
    /// Whether [`EventHub::close`] has run.
    pub closed: bool,
}

struct Table<V> {
    channels: HashMap<SubscriptionId, Channel<V>>,
    next_id: u64,
    seq: u64,
    closed: bool,
}

pub(crate) struct Inner<V> {
    cfg: HubConfig,
    table: Mutex<Table<V>>,
    /// Overflow drops of channels no longer in the table.
    retired_dropped: AtomicU64,
}

impl<V> Inner<V> {
    fn lock(&self) -> MutexGuard<'_, Table<V>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes and discards a subscription. Returns `true` if it was live.
    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        {
            let mut table = self.lock();
            let Some(channel) = table.channels.remove(&id) else {
                return false;
            };
            // Under the table lock: no publish can enqueue after this, so the
            // dropped counter is final.
            self.retired_dropped
                .fetch_add(channel.shared().dropped(), Ordering::Relaxed);
            channel.close(CloseMode::Discard);
        }
        debug!(subscription = %id, "subscription cancelled");
        true
    }

    fn close_all(&self, table: &mut Table<V>) -> usize {
        table.closed = true;
        let n = table.channels.len();
        for (_, channel) in table.channels.drain() {
            self.retired_dropped
                .fetch_add(channel.shared().dropped(), Ordering::Relaxed);
            channel.close(CloseMode::Drain);
        }
        n
    }
}

impl<V> Drop for Inner<V> {
    fn drop(&mut self) {
        let table = self.table.get_mut().unwrap_or_else(PoisonError::into_inner);
        if table.closed {
            return;
        }
        table.closed = true;
        for (_, channel) in table.channels.drain() {
            channel.close(CloseMode::Drain);
        }
    }
}

/// Thread-safe broadcast point with one ordered buffer per subscriber.
///
/// Cheap to clone: all clones share the same subscription table. When the
/// last clone is dropped the hub closes itself (see [`EventHub::close`]).
///
/// ## Example
/// ```rust
/// use hubcast::EventHub;
///
/// let hub = EventHub::new();
/// let mut early = hub.subscribe().unwrap();
/// hub.publish(1);
/// let mut late = hub.subscribe().unwrap();
/// hub.publish(2);
///
/// assert_eq!(early.try_recv(), Ok(1));
/// assert_eq!(early.try_recv(), Ok(2));
/// assert_eq!(late.try_recv(), Ok(2)); // no replay of 1
/// ```
pub struct EventHub<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for EventHub<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for EventHub<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("config", &self.inner.cfg)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<V> Default for EventHub<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EventHub<V> {
    /// Creates a hub with [`HubConfig::default`]: unlimited, unbounded.
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Creates a hub with the given configuration.
    pub fn with_config(cfg: HubConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                cfg,
                table: Mutex::new(Table {
                    channels: HashMap::new(),
                    next_id: 1,
                    seq: 0,
                    closed: false,
                }),
                retired_dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Returns a builder for non-default settings.
    pub fn builder() -> HubBuilder {
        HubBuilder::default()
    }

    /// Returns the hub configuration.
    pub fn config(&self) -> &HubConfig {
        &self.inner.cfg
    }

    /// Registers a subscription using the hub's default [`BufferPolicy`].
    ///
    /// Registration is synchronous and effective on return: every value
    /// published afterwards is delivered to the new handle.
    ///
    /// ### Errors
    /// - [`HubError::CapacityExceeded`] if `max_subscribers` live subscriptions exist.
    /// - [`HubError::Closed`] if the hub has been closed.
    pub fn subscribe(&self) -> Result<SubscriptionHandle<V>, HubError> {
        self.subscribe_with(self.inner.cfg.buffer)
    }

    /// Registers a subscription with an explicit [`BufferPolicy`].
    pub fn subscribe_with(
        &self,
        policy: BufferPolicy,
    ) -> Result<SubscriptionHandle<V>, HubError> {
        let rx = {
            let mut table = self.inner.lock();
            if table.closed {
                return Err(HubError::Closed);
            }
            if let Some(limit) = self.inner.cfg.subscriber_limit() {
                if table.channels.len() >= limit {
                    warn!(limit, "subscribe rejected: subscriber limit reached");
                    return Err(HubError::CapacityExceeded { limit });
                }
            }

            let id = SubscriptionId::from_raw(table.next_id);
            table.next_id += 1;
            let (tx, rx) = channel::channel(id, policy);
            table.channels.insert(id, tx);
            rx
        };

        debug!(subscription = %rx.shared().id(), ?policy, "subscribed");
        Ok(SubscriptionHandle::new(rx, Arc::downgrade(&self.inner)))
    }

    /// Cancels a subscription by id.
    ///
    /// Idempotent: returns `true` only for the call that removed a live
    /// subscription. Buffered values are released; a pull in flight on the
    /// handle returns `None`.
    pub fn cancel(&self, id: SubscriptionId) -> bool {
        self.inner.remove(id)
    }

    /// Closes the hub.
    ///
    /// Every live channel is closed in drain mode and removed from the table;
    /// further `subscribe` calls fail with [`HubError::Closed`] and further
    /// `publish` calls reach nobody. Returns `false` if already closed.
    pub fn close(&self) -> bool {
        let closed = {
            let mut table = self.inner.lock();
            if table.closed {
                return false;
            }
            self.inner.close_all(&mut table)
        };
        debug!(channels = closed, "hub closed");
        true
    }

    /// Returns `true` once [`EventHub::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().channels.len()
    }

    /// Snapshot of the hub counters.
    pub fn stats(&self) -> HubStats {
        let table = self.inner.lock();
        let live_dropped: u64 = table.channels.values().map(|c| c.shared().dropped()).sum();
        HubStats {
            subscribers: table.channels.len(),
            published: table.seq,
            dropped: self.inner.retired_dropped.load(Ordering::Relaxed) + live_dropped,
            closed: table.closed,
        }
    }
}

impl<V: Clone> EventHub<V> {
    /// Publishes a value to every live subscription.
    ///
    /// Never fails and never waits on a consumer. Returns the number of
    /// subscriptions that enqueued the value; subscriptions whose bounded
    /// buffer was full count the drop instead.
    pub fn publish(&self, value: V) -> usize {
        let mut table = self.inner.lock();
        table.seq += 1;
        let seq = table.seq;

        let mut delivered = 0;
        for channel in table.channels.values() {
            match channel.push(Envelope {
                seq,
                value: value.clone(),
            }) {
                Push::Enqueued => delivered += 1,
                Push::Dropped => {
                    warn!(subscription = %channel.shared().id(), seq, "value dropped: buffer full");
                }
                Push::Closed => {}
            }
        }
        drop(table);

        trace!(seq, delivered, "published");
        delivered
    }
}
