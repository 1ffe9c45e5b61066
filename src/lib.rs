//! listenbus - in-process event bus
//!
//! Producers raise named events carrying an arbitrary payload, and the
//! listeners registered on a [`Bus`] react to them. Built for decoupling
//! components inside one process (UI actions, lifecycle hooks), not for
//! messaging across processes.
//!
//! - [`Event`]: a named occurrence. Derive it, implement it, or use [`BasicEvent`].
//! - [`Listener`]: reacts to an event and its [`Payload`]. Closures become
//!   listeners through [`listener_fn`].
//! - [`NamedListener`]: lets only events with a given name through to its delegate.
//! - [`Bus`]: stores listeners in registration order and dispatches either on
//!   the caller's thread (blocking) or as one detached task (concurrent).
//!
//! ```rust
//! use listenbus::{BasicEvent, Bus, payload};
//!
//! let bus = Bus::<BasicEvent>::new(false);
//! bus.add_named_fn("saved", |_, payload| {
//!     println!("saved {} bytes", payload.get::<usize>(0).unwrap_or(&0));
//! });
//! bus.call_event(BasicEvent::new("saved"), payload![512usize]).unwrap();
//! ```
//!
//! See `demos/ui-actions.rs` and `demos/lifecycle.rs`.

mod bus;
mod config;
mod dispatch_id;
mod error;
mod event;
mod failure_policy;
mod listener;
mod named_listener;
mod payload;

mod internal;

pub use bus::Bus;
pub use config::Config;
pub use dispatch_id::DispatchId;
pub use error::{Error, ListenerFailure};
pub use event::{BasicEvent, Event};
pub use failure_policy::FailurePolicy;
pub use listener::{FnListener, Listener, listener_fn};
pub use named_listener::NamedListener;
pub use payload::{Payload, Value};

#[cfg(feature = "macros")]
pub use listenbus_macros::Event;

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        BasicEvent, Bus, Event, Listener, NamedListener, Payload, listener_fn, payload,
    };
}
