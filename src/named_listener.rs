use std::{fmt, sync::Arc};

use crate::{Event, Listener, Payload};

/// Listener filter that only forwards events with a given name.
///
/// Wraps a delegate listener and compares each dispatched event's
/// [`Event::name`] against the captured name. On an exact, case-sensitive
/// match the call is forwarded unchanged; otherwise it's a silent no-op.
///
/// ```rust
/// use listenbus::{BasicEvent, Listener, NamedListener, listener_fn};
///
/// let click = NamedListener::new("click", listener_fn(|_: &BasicEvent, _| {}));
/// assert!(click.matches(&BasicEvent::new("click")));
/// assert!(!click.matches(&BasicEvent::new("Click")));
/// ```
pub struct NamedListener<L> {
    name: Arc<str>,
    delegate: L,
}

impl<L> NamedListener<L> {
    pub fn new<N>(name: N, delegate: L) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            delegate,
        }
    }

    /// The event name this filter lets through.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delegate(&self) -> &L {
        &self.delegate
    }

    /// Whether `event` would be forwarded to the delegate.
    #[inline]
    pub fn matches<E: Event>(&self, event: &E) -> bool {
        event.name() == *self.name
    }
}

impl<E: Event, L: Listener<E>> Listener<E> for NamedListener<L> {
    fn react(&self, event: &E, payload: &Payload) {
        if !self.matches(event) {
            return;
        }
        self.delegate.react(event, payload)
    }
}

impl<L> fmt::Debug for NamedListener<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedListener")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
