//! Event hub: subscription table, per-subscriber channels and handles.
//!
//! This module groups the **broadcast side** of the crate: the hub that
//! accepts synchronous `publish` calls and the handles consumers pull from.
//!
//! ## Contents
//! - [`EventHub`], [`HubStats`] subscription table and synchronous publish
//! - [`SubscriptionHandle`] consumer end of one channel (pull / cancel)
//! - [`SubscriptionId`] opaque per-registration identifier
//! - [`Envelope`] value plus hub-wide sequence number
//!
//! ## Quick reference
//! - **Publishers**: any thread, via `EventHub::publish` (never waits).
//! - **Consumers**: one puller per handle, via `recv` / `try_recv` /
//!   `into_stream`, or a [`SequentialConsumer`](crate::SequentialConsumer).
//!
//! Lock order is always table → channel; pulls take only the channel lock.

mod channel;
mod envelope;
mod event_hub;
mod handle;
mod id;

pub use envelope::Envelope;
pub use event_hub::{EventHub, HubStats};
pub use handle::SubscriptionHandle;
pub use id::SubscriptionId;
