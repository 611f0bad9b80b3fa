//! Multi-subscriber fan-out: late subscribers, independent consumers.

use std::sync::Arc;

use futures::StreamExt;
use hubcast::{Accumulator, EventHub, SequentialConsumer};
use proptest::prelude::*;

fn values_and_split() -> impl Strategy<Value = (Vec<u32>, usize)> {
    proptest::collection::vec(any::<u32>(), 1..128).prop_flat_map(|values| {
        let n = values.len();
        (Just(values), 0..n)
    })
}

proptest! {
    #[test]
    fn late_subscriber_sees_only_later_values((values, k) in values_and_split()) {
        let hub = EventHub::new();
        let mut early = hub.subscribe().unwrap();

        for v in &values[..=k] {
            hub.publish(*v);
        }
        let mut late = hub.subscribe().unwrap();
        for v in &values[k + 1..] {
            hub.publish(*v);
        }

        let mut seen_early = Vec::new();
        while let Ok(v) = early.try_recv() {
            seen_early.push(v);
        }
        let mut seen_late = Vec::new();
        while let Ok(v) = late.try_recv() {
            seen_late.push(v);
        }

        prop_assert_eq!(seen_early, values.clone());
        prop_assert_eq!(seen_late, values[k + 1..].to_vec());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_two_consumers_each_observe_full_sequence() {
    let hub: EventHub<u32> = EventHub::new();
    let first = Arc::new(Accumulator::<u32>::new());
    let second = Arc::new(Accumulator::<u32>::new());

    let c1 = SequentialConsumer::new(&hub, first.clone()).unwrap().spawn();
    let c2 = SequentialConsumer::new(&hub, second.clone()).unwrap().spawn();

    for i in 0..=100 {
        hub.publish(i);
    }
    hub.close();

    let (r1, r2) = (c1.await.unwrap(), c2.await.unwrap());
    let expected: Vec<u32> = (0..=100).collect();
    assert_eq!(r1.handled, 101);
    assert_eq!(r2.handled, 101);
    assert_eq!(first.snapshot().await, expected);
    assert_eq!(second.snapshot().await, expected);
}

#[tokio::test]
async fn test_slow_consumer_does_not_hold_back_fast_one() {
    let hub: EventHub<u32> = EventHub::new();
    let fast = Arc::new(Accumulator::<u32>::new());

    // Never pulled: values pile up in its own buffer only.
    let idle = hub.subscribe().unwrap();
    let consumer = SequentialConsumer::new(&hub, fast.clone()).unwrap().spawn();

    for i in 0..50 {
        hub.publish(i);
    }
    hub.close();

    assert_eq!(consumer.await.unwrap().handled, 50);
    assert_eq!(fast.len().await, 50);
    assert_eq!(idle.buffered(), 50);
}

#[tokio::test]
async fn test_streams_are_independent() {
    let hub: EventHub<u32> = EventHub::new();
    let s1 = hub.subscribe().unwrap().into_stream();
    let s2 = hub.subscribe().unwrap().into_stream();

    for i in 0..=100 {
        hub.publish(i);
    }
    hub.close();

    let (v1, v2): (Vec<u32>, Vec<u32>) = tokio::join!(s1.collect(), s2.collect());
    let expected: Vec<u32> = (0..=100).collect();
    assert_eq!(v1, expected);
    assert_eq!(v2, expected);
}
