//! # Subscription handle: pull values, cancel, inspect.
//!
//! A [`SubscriptionHandle`] is the consumer's end of one subscriber channel.
//! Pulling needs `&mut self`, so a handle has exactly one puller; cancelling
//! needs only `&self` (or the [`SubscriptionId`] via
//! [`EventHub::cancel`](crate::EventHub::cancel)) and may race with a pull.
//!
//! ## Lifecycle
//! ```text
//! EventHub::subscribe() ──► handle ──► recv() / try_recv() / into_stream()
//!                              │
//!                              ├─► cancel()  ─► removed from hub, buffer released
//!                              └─► drop      ─► same as cancel()
//! ```
//!
//! ## End of sequence
//! `recv()` returns `None` once the channel is closed and nothing is left to
//! pull. That is the normal terminal signal after cancel or hub shutdown, not
//! an error.

use std::fmt;
use std::sync::Weak;

use futures::Stream;
use tokio::sync::mpsc::error::TryRecvError as MpscTryRecvError;

use super::channel::{CloseMode, Receiver};
use super::event_hub::Inner;
use super::{Envelope, SubscriptionId};
use crate::error::TryRecvError;
use crate::policies::BufferPolicy;

/// Consumer handle for one subscription.
///
/// Dropping the handle cancels the subscription.
pub struct SubscriptionHandle<V> {
    rx: Receiver<V>,
    hub: Weak<Inner<V>>,
}

impl<V> SubscriptionHandle<V> {
    pub(crate) fn new(rx: Receiver<V>, hub: Weak<Inner<V>>) -> Self {
        Self { rx, hub }
    }

    /// The subscription's identifier.
    pub fn id(&self) -> SubscriptionId {
        self.rx.shared().id()
    }

    /// The buffering policy this subscription was created with.
    pub fn policy(&self) -> BufferPolicy {
        self.rx.shared().policy()
    }

    /// Waits for the next value.
    ///
    /// Suspends the calling task (never blocks a thread) while the channel is
    /// empty and open. Returns `None` once the channel is closed and drained.
    ///
    /// Cancel-safe: dropping the future (e.g. on timeout) loses nothing.
    pub async fn recv(&mut self) -> Option<V> {
        self.recv_envelope().await.map(Envelope::into_value)
    }

    /// Like [`recv`](Self::recv), keeping the hub-wide sequence number.
    pub async fn recv_envelope(&mut self) -> Option<Envelope<V>> {
        self.rx.recv().await
    }

    /// Pulls the next value without suspending.
    pub fn try_recv(&mut self) -> Result<V, TryRecvError> {
        self.try_recv_envelope().map(Envelope::into_value)
    }

    /// Like [`try_recv`](Self::try_recv), keeping the hub-wide sequence number.
    pub fn try_recv_envelope(&mut self) -> Result<Envelope<V>, TryRecvError> {
        self.rx.try_recv().map_err(|e| match e {
            MpscTryRecvError::Empty => TryRecvError::Empty,
            MpscTryRecvError::Disconnected => TryRecvError::Closed,
        })
    }

    /// Cancels the subscription.
    ///
    /// Idempotent. The subscription is removed from the hub synchronously, so
    /// no later `publish` reaches it; its buffered values are released and the
    /// next pull (or one in flight) returns `None`. Returns `true` only if this
    /// call removed a live subscription from the hub.
    pub fn cancel(&self) -> bool {
        let removed = self
            .hub
            .upgrade()
            .map(|hub| hub.remove(self.id()))
            .unwrap_or(false);
        // Covers a hub that is gone or already closed in drain mode.
        self.rx.shared().mark_closed(CloseMode::Discard);
        removed
    }

    /// Returns `true` once no new value can arrive (values may still be buffered).
    pub fn is_closed(&self) -> bool {
        self.rx.shared().close_mode().is_some()
    }

    /// Returns `true` if the hub shut down and buffered values are still
    /// being handed out. `false` after a cancel, which releases the buffer.
    pub fn is_draining(&self) -> bool {
        self.rx.shared().close_mode() == Some(CloseMode::Drain)
    }

    /// Number of values buffered and not yet pulled.
    pub fn buffered(&self) -> usize {
        match self.rx.shared().close_mode() {
            Some(CloseMode::Discard) => 0,
            _ => self.rx.len(),
        }
    }

    /// Number of values dropped for this subscription by its [`BufferPolicy`].
    ///
    /// Always `0` under [`BufferPolicy::Unbounded`].
    pub fn overflow_count(&self) -> u64 {
        self.rx.shared().dropped()
    }
}

impl<V: Send + 'static> SubscriptionHandle<V> {
    /// Converts the handle into a [`Stream`] of values.
    ///
    /// The stream ends when the channel is closed and drained; dropping the
    /// stream cancels the subscription.
    pub fn into_stream(self) -> impl Stream<Item = V> + Send + 'static {
        futures::stream::unfold(self, |mut handle| async move {
            let value = handle.recv().await?;
            Some((value, handle))
        })
    }
}

impl<V> Drop for SubscriptionHandle<V> {
    fn drop(&mut self) {
        self.cancel();
        self.rx.discard();
    }
}

impl<V> fmt::Debug for SubscriptionHandle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id())
            .field("policy", &self.policy())
            .field("buffered", &self.buffered())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;

    use crate::EventHub;

    use super::*;

    #[tokio::test]
    async fn test_recv_suspends_until_publish() {
        let hub = EventHub::new();
        let mut sub = hub.subscribe().unwrap();

        let publisher = {
            let hub = hub.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                hub.publish(42u32);
            })
        };

        assert_eq!(sub.recv().await, Some(42));
        publisher.await.unwrap();
    }

    #[tokio::test]
    async fn test_timed_out_recv_leaves_handle_usable() {
        let hub = EventHub::new();
        let mut sub = hub.subscribe().unwrap();

        let res = tokio::time::timeout(Duration::from_millis(5), sub.recv()).await;
        assert!(res.is_err());

        hub.publish(1u32);
        assert_eq!(sub.recv().await, Some(1));
        assert!(sub.cancel());
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn test_cancel_from_other_task_ends_inflight_recv() {
        let hub: EventHub<u32> = EventHub::new();
        let mut sub = hub.subscribe().unwrap();
        let id = sub.id();

        let puller = tokio::spawn(async move { sub.recv().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(hub.cancel(id));

        assert_eq!(puller.await.unwrap(), None);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_stream_ends_on_hub_close() {
        let hub = EventHub::new();
        let stream = hub.subscribe().unwrap().into_stream();
        for i in 0..5u32 {
            hub.publish(i);
        }
        hub.close();

        let got: Vec<u32> = stream.collect().await;
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_draining_only_after_hub_shutdown() {
        let hub: EventHub<u32> = EventHub::new();
        let cancelled = hub.subscribe().unwrap();
        let mut drained = hub.subscribe().unwrap();
        hub.publish(1);

        assert!(hub.cancel(cancelled.id()));
        assert!(cancelled.is_closed());
        assert!(!cancelled.is_draining());
        assert_eq!(cancelled.buffered(), 0);

        assert!(!drained.is_draining());
        hub.close();
        assert!(drained.is_draining());
        assert_eq!(drained.buffered(), 1);
        assert_eq!(drained.try_recv(), Ok(1));

        // A cancel after shutdown still releases the buffer.
        drained.cancel();
        assert!(!drained.is_draining());
    }

    #[test]
    fn test_cancel_stops_delivery_immediately() {
        let hub: EventHub<u32> = EventHub::new();
        let mut sub = hub.subscribe().unwrap();
        hub.publish(1);
        assert!(sub.cancel());

        assert_eq!(hub.publish(2), 0);
        assert_eq!(sub.buffered(), 0);
        assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_drop_unregisters() {
        let hub: EventHub<u32> = EventHub::new();
        let sub = hub.subscribe().unwrap();
        assert_eq!(hub.subscriber_count(), 1);
        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
