//! Backpressure policies.
//!
//! This module groups the knobs that control **what happens** when a
//! subscriber's buffer cannot keep up with the publisher.
//!
//! ## Contents
//! - [`BufferPolicy`] per-subscription buffering (unbounded / drop-newest)
//!
//! ## Quick wiring
//! ```text
//! HubConfig { buffer: BufferPolicy, .. }
//!      └─► EventHub::subscribe()            (hub-wide default)
//!      └─► EventHub::subscribe_with(policy) (per-subscription override)
//!           └─► Channel::push() consults policy.capacity() on every publish
//! ```
//!
//! ## Defaults
//! - `BufferPolicy::Unbounded`: nothing published after `subscribe` is ever lost.

mod buffer;

pub use buffer::BufferPolicy;
