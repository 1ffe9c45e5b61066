use std::{fmt, marker::PhantomData, sync::Arc};

use crate::{Event, Payload};

/// A unit of reaction logic registered in a [`Bus`](crate::Bus).
///
/// `react` is called once per dispatch the listener takes part in. It receives
/// the dispatched event and payload by shared reference, performs its side
/// effects and returns nothing.
///
/// Listeners are `Send + Sync + 'static` because the bus stores them behind an
/// `Arc` and, in concurrent mode, invokes them from a detached task. Use
/// interior mutability (atomics, `Mutex`) for any state a listener keeps.
///
/// A listener should not panic. When it does, the bus's
/// [`FailurePolicy`](crate::FailurePolicy) decides whether the panic is
/// contained or propagated.
///
/// For ad-hoc listeners built from closures see [`listener_fn`].
pub trait Listener<E: Event>: Send + Sync + 'static {
    fn react(&self, event: &E, payload: &Payload);
}

impl<E: Event, L: Listener<E> + ?Sized> Listener<E> for Arc<L> {
    fn react(&self, event: &E, payload: &Payload) {
        (**self).react(event, payload)
    }
}

impl<E: Event, L: Listener<E> + ?Sized> Listener<E> for Box<L> {
    fn react(&self, event: &E, payload: &Payload) {
        (**self).react(event, payload)
    }
}

/// Listener adapter around a plain function or closure.
///
/// ```rust
/// use listenbus::{BasicEvent, Bus, listener_fn};
///
/// let bus = Bus::<BasicEvent>::new(false);
/// bus.add_listener(listener_fn(|event: &BasicEvent, _payload| {
///     println!("got {event}");
/// }));
/// ```
pub struct FnListener<E, F> {
    f: F,
    _event: PhantomData<fn(&E)>,
}

impl<E, F> FnListener<E, F>
where
    E: Event,
    F: Fn(&E, &Payload) + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _event: PhantomData,
        }
    }
}

impl<E, F> Listener<E> for FnListener<E, F>
where
    E: Event,
    F: Fn(&E, &Payload) + Send + Sync + 'static,
{
    #[inline]
    fn react(&self, event: &E, payload: &Payload) {
        (self.f)(event, payload)
    }
}

impl<E, F> fmt::Debug for FnListener<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

/// Wrap a closure into a [`Listener`].
pub fn listener_fn<E, F>(f: F) -> FnListener<E, F>
where
    E: Event,
    F: Fn(&E, &Payload) + Send + Sync + 'static,
{
    FnListener::new(f)
}
