//! Concurrent (fire-and-forget) dispatch.

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
    time::{Duration, Instant},
};

use listenbus::{BasicEvent, Bus, Config, FailurePolicy, Payload, payload};

const WAIT: Duration = Duration::from_secs(5);

fn wait_until(cond: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < WAIT {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}

#[test]
fn test_call_event_returns_before_listeners_run() {
    let bus = Bus::<BasicEvent>::new(true);
    let (gate_tx, gate_rx) = mpsc::channel::<()>();
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let gate_rx = Mutex::new(gate_rx);
    let done_tx = Mutex::new(done_tx);
    let ran = Arc::new(AtomicBool::new(false));

    let flag = ran.clone();
    bus.add_fn(move |_, _| {
        // Held until the caller has already returned from `call_event`.
        gate_rx.lock().unwrap().recv().unwrap();
        flag.store(true, Ordering::SeqCst);
        done_tx.lock().unwrap().send(()).unwrap();
    });

    bus.call(BasicEvent::new("x")).unwrap();
    assert!(!ran.load(Ordering::SeqCst));
    assert_eq!(bus.in_flight(), 1);

    gate_tx.send(()).unwrap();
    done_rx.recv_timeout(WAIT).unwrap();
    assert!(ran.load(Ordering::SeqCst));
    assert!(wait_until(|| bus.in_flight() == 0));
}

#[test]
fn test_fan_out_keeps_registration_order() {
    let bus = Bus::<BasicEvent>::new(true);
    let log = Arc::new(Mutex::new(Vec::new()));
    let (done_tx, done_rx) = mpsc::channel::<Vec<&'static str>>();
    let done_tx = Mutex::new(done_tx);

    for tag in ["L1", "L2", "L3"] {
        let log = log.clone();
        bus.add_fn(move |_, _| log.lock().unwrap().push(tag));
    }
    let snapshot = log.clone();
    bus.add_fn(move |_, _| {
        done_tx
            .lock()
            .unwrap()
            .send(snapshot.lock().unwrap().clone())
            .unwrap();
    });

    bus.call(BasicEvent::new("x")).unwrap();
    assert_eq!(done_rx.recv_timeout(WAIT).unwrap(), ["L1", "L2", "L3"]);
}

#[test]
fn test_listeners_share_event_and_payload() {
    let bus = Bus::<BasicEvent>::new(true);
    let (tx, rx) = mpsc::channel::<(String, u64)>();

    for _ in 0..2 {
        let tx = Mutex::new(tx.clone());
        bus.add_fn(move |event: &BasicEvent, payload: &Payload| {
            let value = *payload.get::<u64>(0).unwrap();
            tx.lock()
                .unwrap()
                .send((event.to_string(), value))
                .unwrap();
        });
    }

    bus.call_event(BasicEvent::new("tick").with_source("clock"), payload![99u64])
        .unwrap();

    for _ in 0..2 {
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), ("tick@clock".to_string(), 99));
    }
}

#[test]
fn test_isolated_panic_is_counted_not_returned() {
    let bus = Bus::<BasicEvent>::new(true);
    let (tx, rx) = mpsc::channel::<()>();
    let tx = Mutex::new(tx);

    bus.add_fn(|_, _| panic!("detached failure"));
    bus.add_fn(move |_, _| tx.lock().unwrap().send(()).unwrap());

    assert!(bus.call(BasicEvent::new("x")).is_ok());

    rx.recv_timeout(WAIT).unwrap();
    assert!(wait_until(|| bus.failure_count() == 1));
}

#[test]
fn test_propagated_panic_ends_only_the_task() {
    let bus = Bus::<BasicEvent>::with_config(
        Config::default()
            .with_concurrent_dispatch(true)
            .with_failure_policy(FailurePolicy::Propagate),
    );
    let after = Arc::new(AtomicBool::new(false));

    bus.add_fn(|_, _| panic!("detached failure"));
    let flag = after.clone();
    bus.add_fn(move |_, _| flag.store(true, Ordering::SeqCst));

    assert!(bus.call(BasicEvent::new("x")).is_ok());

    assert!(wait_until(|| bus.in_flight() == 0));
    assert_eq!(bus.failure_count(), 1);
    assert!(!after.load(Ordering::SeqCst));
}

#[test]
fn test_fallback_thread_uses_configured_name() {
    let bus = Bus::<BasicEvent>::with_config(
        Config::default()
            .with_concurrent_dispatch(true)
            .with_thread_name("ui-events"),
    );
    let (tx, rx) = mpsc::channel::<Option<String>>();
    let tx = Mutex::new(tx);
    bus.add_fn(move |_, _| {
        let name = thread::current().name().map(str::to_owned);
        tx.lock().unwrap().send(name).unwrap();
    });

    bus.call(BasicEvent::new("x")).unwrap();
    assert_eq!(rx.recv_timeout(WAIT).unwrap().as_deref(), Some("ui-events"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dispatch_inside_tokio_runtime() {
    let bus = Bus::<BasicEvent>::new(true);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<&'static str>();

    for tag in ["first", "second"] {
        let tx = tx.clone();
        bus.add_fn(move |_, _| {
            let _ = tx.send(tag);
        });
    }
    drop(tx);

    bus.call(BasicEvent::new("x")).unwrap();

    let mut received = Vec::new();
    while let Ok(Some(tag)) = tokio::time::timeout(WAIT, rx.recv()).await {
        received.push(tag);
        if received.len() == 2 {
            break;
        }
    }
    assert_eq!(received, ["first", "second"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overlapping_dispatches_all_complete() {
    let bus = Bus::<BasicEvent>::new(true);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    bus.add_fn(move |event, _| {
        let _ = tx.send(event.to_string());
    });

    for i in 0..10 {
        bus.call(BasicEvent::new(format!("e{i}"))).unwrap();
    }

    let mut received = Vec::new();
    while received.len() < 10 {
        let Ok(Some(name)) = tokio::time::timeout(WAIT, rx.recv()).await else {
            break;
        };
        received.push(name);
    }
    received.sort();
    let mut expected: Vec<String> = (0..10).map(|i| format!("e{i}")).collect();
    expected.sort();
    assert_eq!(received, expected);
}
