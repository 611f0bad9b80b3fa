//! # SequentialConsumer: ordered, one-at-a-time handling of a subscription.
//!
//! [`SequentialConsumer`] owns one [`SubscriptionHandle`] and one [`Handler`].
//! Its pull loop takes the next value, awaits the handler to completion, and
//! only then pulls again.
//!
//! ## Architecture
//! ```text
//! new(hub, handler) ── hub.subscribe() (synchronous, effective immediately)
//!        │
//! run() ─┴─► loop {
//!              ├─► select! { token.cancelled() ─► stop
//!              │            handle.recv()      ─► Some(v) / None ─► stop }
//!              ├─► select! { handler.handle(v)  (panic caught, counted)
//!              │            token.cancelled() ─► handle.cancel(), keep awaiting handler }
//!              └─► continue
//!            }
//!            handle.cancel(); state = Closed
//! ```
//!
//! ## Rules
//! - **Subscribe before suspend**: the subscription exists once `new` returns,
//!   so values published before the loop is first polled are not lost.
//! - **Strict order**: no child task per value; handler calls never overlap
//!   and follow publish order.
//! - **Cooperative cancellation**: a cancelled token never interrupts a running
//!   handler. The subscription is removed from the hub right away, so later
//!   publishes skip it; buffered values are released and no further pull happens.
//! - **Drain on hub close**: everything already buffered is delivered before
//!   the consumer reaches `Closed`.
//! - **Panic isolation**: a panicking handler is reported and the loop moves on.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::{ConsumerReport, ConsumerState, HandlerRef};
use crate::error::HubError;
use crate::hub::{EventHub, SubscriptionHandle, SubscriptionId};
use crate::policies::BufferPolicy;

/// Ordered consumer of one hub subscription.
pub struct SequentialConsumer<V: Send + 'static> {
    handle: SubscriptionHandle<V>,
    handler: HandlerRef<V>,
    token: CancellationToken,
    state: watch::Sender<ConsumerState>,
}

impl<V: Send + 'static> SequentialConsumer<V> {
    /// Subscribes to `hub` with its default buffer policy.
    ///
    /// ### Errors
    /// Propagates [`HubError`] from [`EventHub::subscribe`].
    pub fn new(hub: &EventHub<V>, handler: HandlerRef<V>) -> Result<Self, HubError> {
        Ok(Self::from_handle(hub.subscribe()?, handler))
    }

    /// Subscribes to `hub` with an explicit buffer policy.
    pub fn with_policy(
        hub: &EventHub<V>,
        handler: HandlerRef<V>,
        policy: BufferPolicy,
    ) -> Result<Self, HubError> {
        Ok(Self::from_handle(hub.subscribe_with(policy)?, handler))
    }

    /// Wraps an existing subscription.
    pub fn from_handle(handle: SubscriptionHandle<V>, handler: HandlerRef<V>) -> Self {
        let (state, _) = watch::channel(ConsumerState::Idle);
        let me = Self {
            handle,
            handler,
            token: CancellationToken::new(),
            state,
        };
        me.set_state(ConsumerState::Subscribed);
        me
    }

    /// Subscribes now and returns the pull loop, ready to be awaited or spawned.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use hubcast::{Accumulator, EventHub, SequentialConsumer};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), hubcast::HubError> {
    /// let hub: EventHub<i32> = EventHub::new();
    /// let acc = Arc::new(Accumulator::<i32>::new());
    ///
    /// let consumer = SequentialConsumer::start(&hub, acc.clone())?;
    /// for i in 0..=100 {
    ///     hub.publish(i);
    /// }
    /// hub.close();
    ///
    /// let report = consumer.await;
    /// assert_eq!(report.handled, 101);
    /// assert_eq!(acc.snapshot().await, (0..=100).collect::<Vec<_>>());
    /// # Ok(())
    /// # }
    /// ```
    pub fn start(
        hub: &EventHub<V>,
        handler: HandlerRef<V>,
    ) -> Result<impl Future<Output = ConsumerReport> + Send + 'static, HubError> {
        Ok(Self::new(hub, handler)?.run())
    }

    /// Replaces the cancellation token (e.g. with a child of a runtime token).
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Token that stops this consumer when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Watches the consumer's lifecycle state.
    pub fn state(&self) -> watch::Receiver<ConsumerState> {
        self.state.subscribe()
    }

    /// Identifier of the underlying subscription.
    pub fn subscription_id(&self) -> SubscriptionId {
        self.handle.id()
    }

    /// Spawns the pull loop on the current Tokio runtime.
    pub fn spawn(self) -> JoinHandle<ConsumerReport> {
        tokio::spawn(self.run())
    }

    /// Runs the pull loop until the channel closes and drains, or the token is cancelled.
    pub async fn run(mut self) -> ConsumerReport {
        let mut report = ConsumerReport::default();

        loop {
            let draining = self.handle.is_draining();
            self.set_state(if draining {
                ConsumerState::Draining
            } else {
                ConsumerState::Pulling
            });

            let next = tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    report.cancelled = true;
                    None
                }
                next = self.handle.recv() => next,
            };
            let Some(value) = next else {
                break;
            };

            if !draining {
                self.set_state(ConsumerState::Delivering);
            }
            self.deliver(value, &mut report).await;
        }

        report.overflowed = self.handle.overflow_count();
        self.handle.cancel();
        self.set_state(ConsumerState::Closed);
        debug!(
            consumer = self.handler.name(),
            subscription = %self.handle.id(),
            handled = report.handled,
            panicked = report.panicked,
            cancelled = report.cancelled,
            "consumer finished"
        );
        report
    }

    async fn deliver(&self, value: V, report: &mut ConsumerReport) {
        let fut = AssertUnwindSafe(self.handler.handle(value)).catch_unwind();
        tokio::pin!(fut);

        let outcome = tokio::select! {
            biased;
            outcome = &mut fut => outcome,
            _ = self.token.cancelled() => {
                self.handle.cancel();
                report.cancelled = true;
                debug!(
                    consumer = self.handler.name(),
                    subscription = %self.handle.id(),
                    "cancelled while delivering; waiting for handler"
                );
                fut.await
            }
        };
        match outcome {
            Ok(()) => report.handled += 1,
            Err(panic_err) => {
                report.panicked += 1;
                error!(
                    consumer = self.handler.name(),
                    subscription = %self.handle.id(),
                    info = %panic_message(&*panic_err),
                    "handler panicked"
                );
            }
        }
    }

    fn set_state(&self, next: ConsumerState) {
        let prev = self.state.send_replace(next);
        if prev != next {
            debug!(
                consumer = self.handler.name(),
                subscription = %self.handle.id(),
                from = prev.as_label(),
                to = next.as_label(),
                "consumer state"
            );
        }
    }
}

fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
