//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(V) -> Fut`, producing a fresh future
//! per value. Shared state, if any, goes into the closure explicitly as `Arc<...>`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use hubcast::{Handler, HandlerFn, HandlerRef};
//!
//! let total = Arc::new(AtomicU64::new(0));
//! let sum = Arc::clone(&total);
//! let h: HandlerRef<u64> = HandlerFn::arc("sum", move |v: u64| {
//!     let sum = Arc::clone(&sum);
//!     async move {
//!         sum.fetch_add(v, Ordering::Relaxed);
//!     }
//! });
//!
//! assert_eq!(h.name(), "sum");
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::Handler;

/// Function-backed handler implementation.
#[derive(Debug)]
pub struct HandlerFn<F> {
    name: &'static str,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`](super::HandlerRef).
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    /// Creates the handler and returns it behind an `Arc`.
    pub fn arc(name: &'static str, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<V, F, Fut> Handler<V> for HandlerFn<F>
where
    V: Send + 'static,
    F: Fn(V) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle(&self, value: V) {
        (self.f)(value).await
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
