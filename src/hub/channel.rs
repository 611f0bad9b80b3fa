//! # Per-subscriber FIFO channel.
//!
//! Each subscription is one [`tokio::sync::mpsc`] channel. The hub keeps the
//! sending side ([`Channel`]) in its table; the [`SubscriptionHandle`](super::SubscriptionHandle)
//! owns the receiving side ([`Receiver`]). Both share a small [`Shared`] record
//! with the overflow counter and the close mode.
//!
//! ```text
//! EventHub table ──► Channel { tx } ──► [mpsc queue] ──► Receiver { rx } ──► handle.recv()
//!                        └────────── Arc<Shared> ──────────┘
//!                             (id, policy, dropped, close mode)
//! ```
//!
//! ## Rules
//! - `push` never waits: `try_send` on a bounded queue, `send` on an unbounded one.
//! - A full bounded queue drops the **new** value for this subscriber only and
//!   bumps `dropped`.
//! - Dropping the sender is a drain-mode close: the receiver still yields what
//!   is buffered, then `None`.
//! - A discard-mode close marks [`Shared`] first; the receiver then closes and
//!   empties its queue on the next pull (or when the handle is dropped).
//! - `mpsc::Receiver::recv` is cancel-safe, so an abandoned pull loses nothing.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::{Envelope, SubscriptionId};
use crate::policies::BufferPolicy;

/// Result of offering a value to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Push {
    Enqueued,
    Dropped,
    Closed,
}

/// How a channel was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseMode {
    /// Keep buffered values; the puller drains them, then sees closure.
    Drain,
    /// Release buffered values; the puller sees closure on its next pull.
    Discard,
}

const OPEN: u8 = 0;
const DRAIN: u8 = 1;
const DISCARD: u8 = 2;

/// State shared by both ends of one subscription.
#[derive(Debug)]
pub(crate) struct Shared {
    id: SubscriptionId,
    policy: BufferPolicy,
    dropped: AtomicU64,
    closed: AtomicU8,
}

impl Shared {
    pub(crate) fn id(&self) -> SubscriptionId {
        self.id
    }

    pub(crate) fn policy(&self) -> BufferPolicy {
        self.policy
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Records a close. Discard always wins over drain; returns `true` on the first close.
    pub(crate) fn mark_closed(&self, mode: CloseMode) -> bool {
        let prev = match mode {
            CloseMode::Drain => self
                .closed
                .compare_exchange(OPEN, DRAIN, Ordering::AcqRel, Ordering::Acquire)
                .unwrap_or_else(|current| current),
            CloseMode::Discard => self.closed.swap(DISCARD, Ordering::AcqRel),
        };
        prev == OPEN
    }

    pub(crate) fn close_mode(&self) -> Option<CloseMode> {
        match self.closed.load(Ordering::Acquire) {
            OPEN => None,
            DRAIN => Some(CloseMode::Drain),
            _ => Some(CloseMode::Discard),
        }
    }
}

enum Sender<V> {
    Bounded(mpsc::Sender<Envelope<V>>),
    Unbounded(mpsc::UnboundedSender<Envelope<V>>),
}

/// Hub-side end of one subscription.
pub(crate) struct Channel<V> {
    tx: Sender<V>,
    shared: Arc<Shared>,
}

impl<V> Channel<V> {
    pub(crate) fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }

    pub(crate) fn push(&self, envelope: Envelope<V>) -> Push {
        match &self.tx {
            Sender::Bounded(tx) => match tx.try_send(envelope) {
                Ok(()) => Push::Enqueued,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    self.shared.dropped.fetch_add(1, Ordering::Relaxed);
                    Push::Dropped
                }
                Err(mpsc::error::TrySendError::Closed(_)) => Push::Closed,
            },
            Sender::Unbounded(tx) => match tx.send(envelope) {
                Ok(()) => Push::Enqueued,
                Err(_) => Push::Closed,
            },
        }
    }

    /// Closes the channel and drops the sender.
    pub(crate) fn close(self, mode: CloseMode) {
        self.shared.mark_closed(mode);
    }
}

enum Rx<V> {
    Bounded(mpsc::Receiver<Envelope<V>>),
    Unbounded(mpsc::UnboundedReceiver<Envelope<V>>),
}

/// Handle-side end of one subscription.
pub(crate) struct Receiver<V> {
    rx: Rx<V>,
    shared: Arc<Shared>,
}

impl<V> Receiver<V> {
    pub(crate) fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }

    /// Waits for the next value; `None` once closed and drained, or discarded.
    pub(crate) async fn recv(&mut self) -> Option<Envelope<V>> {
        if self.discard_if_requested() {
            return None;
        }
        let envelope = match &mut self.rx {
            Rx::Bounded(rx) => rx.recv().await,
            Rx::Unbounded(rx) => rx.recv().await,
        };
        if self.discard_if_requested() {
            return None;
        }
        envelope
    }

    pub(crate) fn try_recv(&mut self) -> Result<Envelope<V>, mpsc::error::TryRecvError> {
        if self.discard_if_requested() {
            return Err(mpsc::error::TryRecvError::Disconnected);
        }
        match &mut self.rx {
            Rx::Bounded(rx) => rx.try_recv(),
            Rx::Unbounded(rx) => rx.try_recv(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match &self.rx {
            Rx::Bounded(rx) => rx.len(),
            Rx::Unbounded(rx) => rx.len(),
        }
    }

    /// Closes the queue and releases everything buffered.
    pub(crate) fn discard(&mut self) {
        match &mut self.rx {
            Rx::Bounded(rx) => {
                rx.close();
                while rx.try_recv().is_ok() {}
            }
            Rx::Unbounded(rx) => {
                rx.close();
                while rx.try_recv().is_ok() {}
            }
        }
    }

    fn discard_if_requested(&mut self) -> bool {
        if self.shared.close_mode() == Some(CloseMode::Discard) {
            self.discard();
            true
        } else {
            false
        }
    }
}

/// Creates both ends of a subscription channel.
pub(crate) fn channel<V>(id: SubscriptionId, policy: BufferPolicy) -> (Channel<V>, Receiver<V>) {
    let shared = Arc::new(Shared {
        id,
        policy,
        dropped: AtomicU64::new(0),
        closed: AtomicU8::new(OPEN),
    });
    let (tx, rx) = match policy.capacity() {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity);
            (Sender::Bounded(tx), Rx::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (Sender::Unbounded(tx), Rx::Unbounded(rx))
        }
    };
    (
        Channel {
            tx,
            shared: Arc::clone(&shared),
        },
        Receiver { rx, shared },
    )
}
