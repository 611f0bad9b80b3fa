//! # hubcast
//!
//! **hubcast** bridges a hot, synchronous event source to one or more
//! asynchronous consumers that each process every value, in order, at their
//! own pace.
//!
//! The source calls [`EventHub::publish`] and returns immediately. Each
//! consumer holds its own subscription with its own buffer, so a slow consumer
//! never delays the publisher or another consumer, and no consumer steals
//! values from another.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   publisher(s) ── publish(v) ──┐        (sync, never waits)
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventHub<V>                                                      │
//! │  - subscription table (SubscriptionId → channel)                  │
//! │  - hub-wide sequence number, assigned under the table lock        │
//! │  - BufferPolicy per channel (Unbounded | DropNewest + counter)    │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   [channel S1]       [channel S2]       [channel SN]      (tokio mpsc per subscriber)
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//! SequentialConsumer  SequentialConsumer  SubscriptionHandle::recv()
//!   (pull loop)         (pull loop)        (manual pulling / Stream)
//!        │                  │
//!        ▼                  ▼
//!  handler.handle(v)  handler.handle(v)    (awaited one at a time)
//! ```
//!
//! ### Lifecycle
//! ```text
//! SequentialConsumer::new(hub, handler)  ── subscribe() (effective immediately)
//!
//! run() loop {
//!   ├─► Pulling:    recv() suspends while the channel is empty and open
//!   ├─► Delivering: handler.handle(v).await (panics caught and counted)
//!   └─► exit conditions:
//!        - token cancelled        ─► in-flight handler finishes, buffer released
//!        - hub closed             ─► Draining: buffered values flushed first
//!        - subscription cancelled ─► recv() returns None
//! }
//! Closed (terminal): subscription removed from the hub
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                            |
//! |-------------------|-----------------------------------------------------------------|-----------------------------------------------|
//! | **Broadcast**     | Synchronous publish, per-subscriber FIFO, no replay.            | [`EventHub`], [`SubscriptionHandle`]          |
//! | **Consumers**     | Ordered async handling with cancellation and panic isolation.   | [`SequentialConsumer`], [`Handler`]           |
//! | **Backpressure**  | Explicit buffering policy with an observable overflow counter.  | [`BufferPolicy`], [`HubStats`]                |
//! | **Errors**        | Typed, recoverable subscription errors.                         | [`HubError`], [`TryRecvError`]                |
//! | **Configuration** | Subscriber limit and default buffering.                         | [`HubConfig`], [`HubBuilder`]                 |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogHandler` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use hubcast::{Accumulator, EventHub, SequentialConsumer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub: EventHub<u32> = EventHub::new();
//!     let data = Arc::new(Accumulator::<u32>::new());
//!
//!     // Subscribe first, then publish: nothing is lost.
//!     let consumer = SequentialConsumer::new(&hub, data.clone())?.spawn();
//!
//!     for i in 0..=100 {
//!         hub.publish(i);
//!     }
//!     hub.close();
//!
//!     let report = consumer.await?;
//!     assert_eq!(report.handled, 101);
//!     assert_eq!(data.snapshot().await, (0..=100).collect::<Vec<_>>());
//!     Ok(())
//! }
//! ```
mod consumers;
mod core;
mod error;
mod hub;
mod policies;

// ---- Public re-exports ----

pub use crate::core::{HubBuilder, HubConfig};
pub use consumers::{
    Accumulator, ConsumerReport, ConsumerState, Handler, HandlerFn, HandlerRef, SequentialConsumer,
};
pub use error::{HubError, TryRecvError};
pub use hub::{Envelope, EventHub, HubStats, SubscriptionHandle, SubscriptionId};
pub use policies::BufferPolicy;

// Optional: expose a simple built-in logging handler (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use consumers::LogHandler;
