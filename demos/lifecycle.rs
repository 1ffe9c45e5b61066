//! Lifecycle Hooks Example
//!
//! Application lifecycle hooks on a concurrent bus. `call_event` hands the
//! fan-out to tokio's blocking pool and returns immediately, so slow hooks
//! (flushing caches, writing reports) never stall the code raising the event.
//!
//! Hooks of one dispatch still run in registration order; separate dispatches
//! may overlap.

use std::time::Duration;

use listenbus::{BasicEvent, Bus, Config, Payload, payload};

#[tokio::main]
async fn main() -> listenbus::Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let bus = Bus::<BasicEvent>::with_config(
        Config::default()
            .with_concurrent_dispatch(true)
            .with_thread_name("lifecycle-hooks"),
    );

    bus.add_named_fn("started", |event, payload: &Payload| {
        let version = payload.get::<&str>(0).copied().unwrap_or("?");
        println!("[{event}] application v{version} is up");
    });
    bus.add_named_fn("stopping", |event, _| {
        println!("[{event}] flushing caches...");
        std::thread::sleep(Duration::from_millis(200));
        println!("[{event}] caches flushed");
    });
    bus.add_fn(|event, _| println!("audit: {event}"));

    bus.call_event(
        BasicEvent::new("started").with_source("main"),
        payload!["1.4.2"],
    )?;
    println!("main continues while hooks run");

    bus.call(BasicEvent::new("stopping").with_source("main"))?;

    while bus.in_flight() > 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    println!("all hooks finished");
    Ok(())
}
