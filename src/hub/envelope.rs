/// A published value tagged with its hub-wide sequence number.
///
/// Sequence numbers start at 1 and increase by one per `publish` call on the
/// same hub, regardless of how many subscribers received the value. Within a
/// single subscription they are strictly increasing; gaps mean the value was
/// dropped by the subscription's [`BufferPolicy`](crate::BufferPolicy) or
/// published while the subscription did not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<V> {
    /// Hub-wide publish sequence number.
    pub seq: u64,
    /// The published value.
    pub value: V,
}

impl<V> Envelope<V> {
    /// Discards the sequence number.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}
