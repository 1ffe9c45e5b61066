//! UI Actions Example
//!
//! A blocking bus wiring a toolbar to a few independent components.
//!
//! # Key Concepts Demonstrated
//!
//! ## 1. Derived event names
//!
//! `#[derive(Event)]` on an enum names each event after its variant, so
//! `UiEvent::Click { .. }` is dispatched with the name `"Click"`.
//!
//! ## 2. Plain vs. named listeners
//!
//! The status bar listens to everything; the undo stack only cares about
//! `Click` and `KeyPress`, registered through `add_named_listeners`.
//!
//! ## 3. Failure isolation
//!
//! A faulty plugin panics on every event. The default failure policy keeps
//! delivering to the remaining listeners and reports the panic to the caller.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use listenbus::{Bus, Event, Listener, Payload, listener_fn, payload};

#[derive(Event, Clone, Debug)]
#[allow(dead_code)]
enum UiEvent {
    Click { button: &'static str },
    KeyPress(char),
    Hover,
}

/// Records a line for every event it sees.
struct StatusBar {
    lines: Mutex<Vec<String>>,
}

impl Listener<UiEvent> for StatusBar {
    fn react(&self, event: &UiEvent, payload: &Payload) {
        let mut line = format!("{} ({event:?})", event.name());
        if let Some(user) = payload.get::<&str>(0) {
            line.push_str(&format!(" by {user}"));
        }
        self.lines.lock().unwrap().push(line);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let bus = Bus::<UiEvent>::new(false);

    let status = Arc::new(StatusBar {
        lines: Mutex::new(Vec::new()),
    });
    bus.add_listener(status.clone());

    let undo_depth = Arc::new(AtomicUsize::new(0));
    let undoable = (0..2).map(|_| {
        let depth = undo_depth.clone();
        listener_fn(move |_: &UiEvent, _: &Payload| {
            depth.fetch_add(1, Ordering::SeqCst);
        })
    });
    bus.add_named_listeners("Click", undoable);

    let depth = undo_depth.clone();
    bus.add_named_fn("KeyPress", move |event, _| {
        if let UiEvent::KeyPress(key) = event {
            println!("undo stack records key {key:?}");
            depth.fetch_add(1, Ordering::SeqCst);
        }
    });

    bus.add_fn(|_, _| panic!("plugin crashed"));

    for event in [
        UiEvent::Hover,
        UiEvent::Click { button: "save" },
        UiEvent::KeyPress('z'),
    ] {
        if let Err(e) = bus.call_event(event, payload!["alice"]) {
            for failure in e.failures() {
                eprintln!("{failure}");
            }
        }
    }

    for line in status.lines.lock().unwrap().iter() {
        println!("status: {line}");
    }
    println!("undo depth: {}", undo_depth.load(Ordering::SeqCst));
    println!("listener failures: {}", bus.failure_count());
}
