//! # Accumulator — serialized append-only sink
//!
//! [`Accumulator`] collects every value it handles, in call order, behind an
//! async mutex. It is the typical downstream collaborator of a
//! [`SequentialConsumer`](crate::SequentialConsumer): the consumer guarantees
//! call order, the accumulator guarantees mutual exclusion.
//!
//! One accumulator may be shared by several consumers; entries from different
//! consumers then interleave, while each consumer's own entries stay ordered.

use std::fmt::Debug;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;

use super::Handler;

/// Serialized-access sequence of handled values.
#[derive(Debug, Default)]
pub struct Accumulator<V> {
    data: Mutex<Vec<V>>,
}

impl<V> Accumulator<V> {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Mutex::new(Vec::new()),
        }
    }

    /// Appends one value.
    pub async fn push(&self, value: V) {
        self.data.lock().await.push(value);
    }

    /// Number of values accumulated so far.
    pub async fn len(&self) -> usize {
        self.data.lock().await.len()
    }

    /// Returns `true` if nothing has been accumulated.
    pub async fn is_empty(&self) -> bool {
        self.data.lock().await.is_empty()
    }

    /// Consumes the accumulator and returns its contents.
    pub fn into_inner(self) -> Vec<V> {
        self.data.into_inner()
    }
}

impl<V: Clone> Accumulator<V> {
    /// Copy of the current contents, in append order.
    pub async fn snapshot(&self) -> Vec<V> {
        self.data.lock().await.clone()
    }
}

#[async_trait]
impl<V> Handler<V> for Accumulator<V>
where
    V: Debug + Send + 'static,
{
    async fn handle(&self, value: V) {
        trace!(?value, "accumulating");
        self.push(value).await;
    }

    fn name(&self) -> &'static str {
        "accumulator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keeps_call_order() {
        let acc = Accumulator::new();
        for v in [3, 1, 2] {
            acc.handle(v).await;
        }
        assert_eq!(acc.len().await, 3);
        assert_eq!(acc.snapshot().await, vec![3, 1, 2]);
        assert_eq!(acc.into_inner(), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let acc: Accumulator<u8> = Accumulator::new();
        assert!(acc.is_empty().await);
    }
}
