//! # Example: fan_out
//!
//! Several consumers with different speeds and buffering policies share one hub.
//!
//! Demonstrates how to:
//! - Mix [`BufferPolicy::Unbounded`] and [`BufferPolicy::DropNewest`] subscriptions.
//! - Stop consumers through a shared runtime [`CancellationToken`].
//! - Read [`HubStats`](hubcast::HubStats) and per-consumer reports.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example fan_out
//! ```

use std::sync::Arc;
use std::time::Duration;

use hubcast::{Accumulator, BufferPolicy, EventHub, HandlerFn, SequentialConsumer};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub: EventHub<u64> = EventHub::<u64>::builder().max_subscribers(4).build();
    let runtime = CancellationToken::new();

    // 1. Fast, lossless consumer.
    let all = Arc::new(Accumulator::<u64>::new());
    let lossless = SequentialConsumer::new(&hub, all.clone())?
        .with_token(runtime.child_token())
        .spawn();

    // 2. Slow consumer that sheds load beyond 16 buffered values.
    let sampled = Arc::new(Accumulator::<u64>::new());
    let slow = {
        let sampled = Arc::clone(&sampled);
        HandlerFn::arc("slow", move |v: u64| {
            let sampled = Arc::clone(&sampled);
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                sampled.push(v).await;
            }
        })
    };
    let lossy = SequentialConsumer::with_policy(&hub, slow, BufferPolicy::drop_newest(16))?
        .with_token(runtime.child_token())
        .spawn();

    // 3. The source emits in bursts.
    for burst in 0..5u64 {
        for i in 0..50 {
            hub.publish(burst * 50 + i);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    println!("hub: {:?}", hub.stats());

    // 4. Close: both consumers drain what they buffered, then stop.
    hub.close();
    let lossless = lossless.await?;
    let lossy = lossy.await?;

    println!("lossless: {lossless:?} (kept {})", all.len().await);
    println!("lossy:    {lossy:?} (kept {})", sampled.len().await);
    Ok(())
}
