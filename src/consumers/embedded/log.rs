//! # LogHandler — simple value logger
//!
//! A minimal handler that logs each value it receives through `tracing`.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO hubcast::consumers::embedded::log: handled handler="log" value=41
//! INFO hubcast::consumers::embedded::log: handled handler="log" value=42
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::info;

use crate::consumers::Handler;

/// Value logging handler.
#[derive(Debug, Default)]
pub struct LogHandler;

impl LogHandler {
    /// Construct a new [`LogHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<V> Handler<V> for LogHandler
where
    V: Debug + Send + 'static,
{
    async fn handle(&self, value: V) {
        info!(handler = "log", ?value, "handled");
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
