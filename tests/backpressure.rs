//! Buffering policies: no loss when unbounded, exact overflow accounting when bounded.

use std::sync::Arc;

use hubcast::{Accumulator, BufferPolicy, EventHub, HubBuilder, SequentialConsumer};
use proptest::prelude::*;

proptest! {
    #[test]
    fn drop_newest_counts_exactly(capacity in 1usize..32, published in 0u32..200) {
        let hub = EventHub::new();
        let mut sub = hub.subscribe_with(BufferPolicy::drop_newest(capacity)).unwrap();
        for i in 0..published {
            hub.publish(i);
        }

        let kept = (published as usize).min(capacity);
        let expected_drops = published as usize - kept;
        prop_assert_eq!(sub.overflow_count(), expected_drops as u64);
        prop_assert_eq!(hub.stats().dropped, expected_drops as u64);

        let mut seen = Vec::new();
        while let Ok(v) = sub.try_recv() {
            seen.push(v);
        }
        // The oldest values survive; the overflow is the newest ones.
        prop_assert_eq!(seen, (0..kept as u32).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn test_unbounded_keeps_everything_published_before_first_pull() {
    let hub: EventHub<u32> = EventHub::new();
    let data = Arc::new(Accumulator::<u32>::new());
    let consumer = SequentialConsumer::new(&hub, data.clone()).unwrap();

    // The pull loop has not run yet.
    for i in 0..10_000 {
        hub.publish(i);
    }
    hub.close();

    let report = consumer.run().await;
    assert_eq!(report.handled, 10_000);
    assert_eq!(report.overflowed, 0);
    assert_eq!(data.len().await, 10_000);
    assert_eq!(hub.stats().dropped, 0);
}

#[tokio::test]
async fn test_bounded_consumer_reports_overflow() {
    let hub: EventHub<u32> = HubBuilder::default()
        .buffer(BufferPolicy::drop_newest(8))
        .build();
    let data = Arc::new(Accumulator::<u32>::new());
    let consumer = SequentialConsumer::new(&hub, data.clone()).unwrap();

    for i in 0..20 {
        hub.publish(i);
    }
    hub.close();

    let report = consumer.run().await;
    assert_eq!(report.handled, 8);
    assert_eq!(report.overflowed, 12);
    assert_eq!(data.snapshot().await, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_policies_are_per_subscription() {
    let hub: EventHub<u8> = EventHub::new();
    let bounded = hub.subscribe_with(BufferPolicy::drop_newest(1)).unwrap();
    let unbounded = hub.subscribe().unwrap();

    for i in 0..5 {
        hub.publish(i);
    }

    assert_eq!(bounded.buffered(), 1);
    assert_eq!(bounded.overflow_count(), 4);
    assert_eq!(unbounded.buffered(), 5);
    assert_eq!(unbounded.overflow_count(), 0);
    assert_eq!(unbounded.policy(), BufferPolicy::Unbounded);
}
