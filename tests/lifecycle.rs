//! Cancellation, capacity limits, timeouts and shutdown.

use std::sync::Arc;
use std::time::Duration;

use hubcast::{
    Accumulator, ConsumerState, EventHub, HubConfig, HubError, SequentialConsumer, TryRecvError,
};
use tokio_util::sync::CancellationToken;

#[test]
fn test_cancel_mid_stream_is_clean() {
    let hub = EventHub::new();
    let mut cancelled = hub.subscribe().unwrap();
    let mut live = hub.subscribe().unwrap();

    for i in 0..5u32 {
        hub.publish(i);
    }
    assert_eq!(cancelled.try_recv(), Ok(0));
    assert!(cancelled.cancel());

    for i in 5..10u32 {
        assert_eq!(hub.publish(i), 1);
    }

    assert_eq!(cancelled.try_recv(), Err(TryRecvError::Closed));
    let mut seen = Vec::new();
    while let Ok(v) = live.try_recv() {
        seen.push(v);
    }
    assert_eq!(seen, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_capacity_error_is_recoverable() {
    let hub: EventHub<u8> = EventHub::with_config(HubConfig {
        max_subscribers: 1,
        ..HubConfig::default()
    });

    let first = hub.subscribe().unwrap();
    let err = hub.subscribe().unwrap_err();
    assert_eq!(err, HubError::CapacityExceeded { limit: 1 });
    assert!(err.is_retryable());

    first.cancel();
    assert!(hub.subscribe().is_ok());
}

#[tokio::test]
async fn test_timed_out_pull_then_cancel() {
    let hub: EventHub<u8> = EventHub::new();
    let mut sub = hub.subscribe().unwrap();

    for _ in 0..3 {
        let res = tokio::time::timeout(Duration::from_millis(2), sub.recv()).await;
        assert!(res.is_err());
    }

    hub.publish(7);
    assert_eq!(sub.recv().await, Some(7));
    assert!(hub.cancel(sub.id()));
    assert_eq!(sub.recv().await, None);
}

#[tokio::test]
async fn test_runtime_token_stops_consumers() {
    let hub: EventHub<u32> = EventHub::new();
    let runtime = CancellationToken::new();
    let data = Arc::new(Accumulator::<u32>::new());

    let consumer = SequentialConsumer::new(&hub, data.clone())
        .unwrap()
        .with_token(runtime.child_token());
    let mut state = consumer.state();
    let join = consumer.spawn();

    hub.publish(1);
    hub.publish(2);
    while data.len().await < 2 {
        tokio::task::yield_now().await;
    }
    state
        .wait_for(|s| *s == ConsumerState::Pulling)
        .await
        .unwrap();
    runtime.cancel();

    let report = join.await.unwrap();
    assert!(report.cancelled);
    assert_eq!(report.handled, 2);
    assert_eq!(*state.borrow(), ConsumerState::Closed);
    assert_eq!(hub.subscriber_count(), 0);

    // Publishing after the consumer is gone reaches nobody and does not fail.
    assert_eq!(hub.publish(3), 0);
    assert_eq!(data.snapshot().await, vec![1, 2]);
}

#[tokio::test]
async fn test_dropping_hub_ends_consumer_after_drain() {
    let hub: EventHub<u32> = EventHub::new();
    let data = Arc::new(Accumulator::<u32>::new());
    let consumer = SequentialConsumer::new(&hub, data.clone()).unwrap();

    for i in 0..10 {
        hub.publish(i);
    }
    drop(hub);

    let report = consumer.run().await;
    assert!(!report.cancelled);
    assert_eq!(report.handled, 10);
    assert_eq!(data.snapshot().await, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_subscribe_after_close_fails() {
    let hub: EventHub<u8> = EventHub::new();
    hub.close();
    assert_eq!(hub.subscribe().unwrap_err(), HubError::Closed);
    assert!(hub.stats().closed);
}
