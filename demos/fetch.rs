//! # Example: fetch
//!
//! A hot source emits `0..=100` synchronously while one consumer stores every
//! value, in order, into an [`Accumulator`]; a second consumer logs them.
//!
//! Demonstrates how to:
//! - Subscribe **before** the source starts emitting, so nothing is missed.
//! - Drive an ordered async handler with [`SequentialConsumer`].
//! - Shut down with [`EventHub::close`] and let consumers drain.
//!
//! ## Flow
//! ```text
//! SequentialConsumer::new(hub, data)   ── subscribe (sync)
//! SequentialConsumer::new(hub, log)    ── subscribe (sync)
//! fetch(): hub.publish(0..=100)        ── returns immediately
//! hub.close()                          ── consumers drain, then stop
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example fetch --features logging
//! ```

use std::sync::Arc;

use hubcast::{Accumulator, EventHub, LogHandler, SequentialConsumer};
use tracing_subscriber::EnvFilter;

fn fetch(hub: &EventHub<u32>) {
    for i in 0..=100 {
        hub.publish(i);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub: EventHub<u32> = EventHub::new();
    let data = Arc::new(Accumulator::<u32>::new());

    let store = SequentialConsumer::new(&hub, data.clone())?.spawn();
    let log = SequentialConsumer::new(&hub, Arc::new(LogHandler::new()))?.spawn();

    fetch(&hub);
    hub.close();

    let store_report = store.await?;
    let log_report = log.await?;

    println!("stored={} logged={}", store_report.handled, log_report.handled);
    println!("result: {:?}", data.snapshot().await);
    Ok(())
}
