//! # Value handler trait.
//!
//! Provides [`Handler`], the downward interface a
//! [`SequentialConsumer`](crate::SequentialConsumer) drives once per value.
//!
//! ## Rules
//! - `handle` is awaited to completion before the next value is pulled.
//! - For one consumer, calls are never concurrent and arrive in publish order.
//! - Panics are caught by the consumer and counted; the next value is still delivered.
//! - A handler owns its own state; share it behind `Arc` if several consumers feed it.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use hubcast::Handler;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl Handler<u32> for Printer {
//!     async fn handle(&self, value: u32) {
//!         println!("got {value}");
//!     }
//!
//!     fn name(&self) -> &'static str { "printer" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

/// Asynchronous, per-value handling step.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; the consumer has nowhere to propagate them.
/// - Slow processing only delays this consumer's own channel.
#[async_trait]
pub trait Handler<V: Send + 'static>: Send + Sync + 'static {
    /// Processes a single value.
    async fn handle(&self, value: V);

    /// Returns the handler name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose; override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a handler object.
pub type HandlerRef<V> = Arc<dyn Handler<V>>;
