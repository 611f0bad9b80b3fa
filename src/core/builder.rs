use crate::{core::HubConfig, hub::EventHub, policies::BufferPolicy};

/// Builder for constructing an [`EventHub`] with non-default settings.
///
/// ## Example
/// ```rust
/// use hubcast::{BufferPolicy, EventHub, HubBuilder};
///
/// let hub: EventHub<u32> = HubBuilder::default()
///     .max_subscribers(8)
///     .buffer(BufferPolicy::drop_newest(256))
///     .build();
///
/// assert_eq!(hub.config().subscriber_limit(), Some(8));
/// ```
#[derive(Clone, Debug, Default)]
pub struct HubBuilder {
    cfg: HubConfig,
}

impl HubBuilder {
    /// Creates a new builder starting from the given configuration.
    pub fn new(cfg: HubConfig) -> Self {
        Self { cfg }
    }

    /// Sets the live subscription limit (`0` = unlimited).
    pub fn max_subscribers(mut self, limit: usize) -> Self {
        self.cfg.max_subscribers = limit;
        self
    }

    /// Sets the default buffering policy for new subscriptions.
    pub fn buffer(mut self, policy: BufferPolicy) -> Self {
        self.cfg.buffer = policy;
        self
    }

    /// Builds the hub. No subscriptions exist yet.
    pub fn build<V>(self) -> EventHub<V> {
        EventHub::with_config(self.cfg)
    }
}
