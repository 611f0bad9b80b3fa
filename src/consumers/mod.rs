//! # Consumers: ordered asynchronous handling of hub subscriptions.
//!
//! This module provides the [`Handler`] trait, the [`SequentialConsumer`]
//! that drives it, and ready-made handlers.
//!
//! ## Architecture
//! ```text
//! EventHub ── publish(v) ──► [channel S1] ──► SequentialConsumer 1 ──► handler1.handle(v)
//!                        └─► [channel S2] ──► SequentialConsumer 2 ──► handler2.handle(v)
//!                                                   │
//!                                                   └─ one value at a time, publish order
//! ```
//!
//! ## Handler types
//! - **Stateful sinks** — collect values ([`Accumulator`])
//! - **Closures** — ad-hoc async steps ([`HandlerFn`])
//! - **Passive observers** — logging (`LogHandler`, feature `logging`)
//!
//! ## Why not one task per value?
//! Spawning a task per value lets the scheduler reorder the handler calls.
//! `SequentialConsumer` awaits each call in its own loop instead.

mod accumulator;
#[cfg(feature = "logging")]
mod embedded;
mod handler;
mod handler_fn;
mod sequential;
mod state;

pub use accumulator::Accumulator;
#[cfg(feature = "logging")]
pub use embedded::LogHandler;
pub use handler::{Handler, HandlerRef};
pub use handler_fn::HandlerFn;
pub use sequential::SequentialConsumer;
pub use state::{ConsumerReport, ConsumerState};
