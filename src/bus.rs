use std::{fmt, sync::Arc};

use crate::{
    BasicEvent, Config, DispatchId, Error, Event, FnListener, Listener, NamedListener, Payload,
    Result,
    internal::{self, FanOut, InFlight, ListenerRegistry, SharedListener, Stats},
};

/// In-process event bus: owns listeners and fans events out to them.
///
/// - Create one with `Bus::new(allow_concurrent_dispatch)` or [`Bus::with_config`].
///   The dispatch mode is fixed for the lifetime of the bus.
/// - Register listeners with `add_listener`, `add_listeners`, `add_named_listener`
///   and `add_named_listeners`. Registration only appends, in call order.
/// - Dispatch with `call_event(event, payload)`.
///
/// Blocking mode runs every listener on the caller's thread, in registration
/// order, and returns once all of them returned. Concurrent mode detaches the
/// whole fan-out as a single task (listeners still run in registration order
/// within it) and returns at once.
///
/// Each dispatch works on the listeners registered when it started. A listener
/// added while a dispatch is underway, even by one of that dispatch's own
/// listeners, is first called by the next dispatch.
///
/// `Bus` is cheap to clone; clones share listeners and counters.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use listenbus::{BasicEvent, Bus, Payload};
///
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let bus = Bus::<BasicEvent>::new(false);
///
/// let sink = log.clone();
/// bus.add_fn(move |e: &BasicEvent, _: &Payload| sink.lock().unwrap().push(format!("any:{e}")));
/// let sink = log.clone();
/// bus.add_named_fn("click", move |_: &BasicEvent, _: &Payload| sink.lock().unwrap().push("click".to_string()));
///
/// bus.call(BasicEvent::new("hover")).unwrap();
/// bus.call(BasicEvent::new("click")).unwrap();
///
/// assert_eq!(*log.lock().unwrap(), ["any:hover", "any:click", "click"]);
/// ```
pub struct Bus<E: Event = BasicEvent> {
    shared: Arc<Shared<E>>,
}

struct Shared<E: Event> {
    config: Config,
    registry: ListenerRegistry<E>,
    stats: Arc<Stats>,
}

impl<E: Event> Bus<E> {
    /// Create a bus with the default configuration and the given dispatch mode.
    pub fn new(allow_concurrent_dispatch: bool) -> Self {
        Self::with_config(Config::default().with_concurrent_dispatch(allow_concurrent_dispatch))
    }

    pub fn with_config(config: Config) -> Self {
        tracing::debug!(
            concurrent = config.concurrent_dispatch,
            policy = %config.failure_policy,
            "Bus created"
        );
        Self {
            shared: Arc::new(Shared {
                config,
                registry: ListenerRegistry::new(),
                stats: Arc::new(Stats::default()),
            }),
        }
    }

    /// Append a listener. No deduplication: adding the same listener twice
    /// makes it react twice.
    pub fn add_listener<L: Listener<E>>(&self, listener: L) {
        let total = self.shared.registry.push(Arc::new(listener));
        tracing::trace!(total, "Listener added");
    }

    /// Append each listener in iteration order.
    ///
    /// Same as calling [`add_listener`](Bus::add_listener) once per item. Use
    /// `Box<dyn Listener<E>>` items to mix listener types.
    pub fn add_listeners<I>(&self, listeners: I)
    where
        I: IntoIterator,
        I::Item: Listener<E>,
    {
        let batch: Vec<SharedListener<E>> = listeners
            .into_iter()
            .map(|l| Arc::new(l) as SharedListener<E>)
            .collect();
        let added = batch.len();
        let total = self.shared.registry.extend(batch);
        tracing::trace!(added, total, "Listeners added");
    }

    /// Append `listener` behind a [`NamedListener`] filter, so it only reacts
    /// to events whose name equals `name`.
    pub fn add_named_listener<N, L>(&self, name: N, listener: L)
    where
        N: Into<Arc<str>>,
        L: Listener<E>,
    {
        self.add_listener(NamedListener::new(name, listener));
    }

    /// Append one [`NamedListener`] per listener, all filtering on `name`.
    pub fn add_named_listeners<N, I>(&self, name: N, listeners: I)
    where
        N: Into<Arc<str>>,
        I: IntoIterator,
        I::Item: Listener<E>,
    {
        let name: Arc<str> = name.into();
        self.add_listeners(
            listeners
                .into_iter()
                .map(|l| NamedListener::new(name.clone(), l)),
        );
    }

    /// Shorthand for `add_listener(listener_fn(f))`.
    pub fn add_fn<F>(&self, f: F)
    where
        F: Fn(&E, &Payload) + Send + Sync + 'static,
    {
        self.add_listener(FnListener::new(f));
    }

    /// Shorthand for `add_named_listener(name, listener_fn(f))`.
    pub fn add_named_fn<N, F>(&self, name: N, f: F)
    where
        N: Into<Arc<str>>,
        F: Fn(&E, &Payload) + Send + Sync + 'static,
    {
        self.add_named_listener(name, FnListener::new(f));
    }

    /// Dispatch `event` with `payload` to every registered listener.
    ///
    /// With no listeners this is a no-op. In blocking mode the call returns
    /// after all listeners ran; under [`FailurePolicy::Isolate`] any panics are
    /// reported as [`Error::ListenersFailed`] once every listener had its turn.
    /// In concurrent mode the call returns right after handing the fan-out to
    /// another thread, and only fails if that thread couldn't be started.
    ///
    /// Pass `()` for an empty payload, or build one with
    /// [`payload!`](crate::payload!).
    ///
    /// [`FailurePolicy::Isolate`]: crate::FailurePolicy::Isolate
    pub fn call_event<P: Into<Payload>>(&self, event: E, payload: P) -> Result<()> {
        let listeners = self.shared.registry.snapshot();
        if listeners.is_empty() {
            tracing::trace!(event = %event.name(), "No listeners, dispatch skipped");
            return Ok(());
        }

        let fan_out = FanOut {
            id: DispatchId::new(),
            listeners,
            policy: self.shared.config.failure_policy,
            stats: self.shared.stats.clone(),
        };
        let payload = payload.into();

        tracing::debug!(
            dispatch_id = %fan_out.id,
            event = %event.name(),
            listeners = fan_out.listeners.len(),
            payload = payload.len(),
            concurrent = self.is_concurrent(),
            "Dispatching event"
        );

        if self.is_concurrent() {
            self.dispatch_detached(fan_out, event, payload)
        } else {
            Self::dispatch_blocking(&fan_out, &event, &payload)
        }
    }

    /// Dispatch with an empty payload.
    pub fn call(&self, event: E) -> Result<()> {
        self.call_event(event, ())
    }

    fn dispatch_blocking(fan_out: &FanOut<E>, event: &E, payload: &Payload) -> Result<()> {
        let failures = fan_out.run(event, payload);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::ListenersFailed {
                dispatch_id: fan_out.id,
                failures,
            })
        }
    }

    fn dispatch_detached(&self, fan_out: FanOut<E>, event: E, payload: Payload) -> Result<()> {
        let guard = InFlight::enter(&self.shared.stats);
        internal::detach(&self.shared.config.thread_name, move || {
            let _guard = guard;
            let failures = fan_out.run(&event, &payload);
            if !failures.is_empty() {
                tracing::warn!(
                    dispatch_id = %fan_out.id,
                    failed = failures.len(),
                    "Concurrent dispatch finished with failures"
                );
            }
        })
    }

    /// Number of registered listeners (named filters count as one each).
    pub fn len(&self) -> usize {
        self.shared.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `call_event` detaches the fan-out instead of blocking.
    #[inline]
    pub fn is_concurrent(&self) -> bool {
        self.shared.config.concurrent_dispatch
    }

    /// Total number of listener panics seen by this bus so far, in either mode.
    pub fn failure_count(&self) -> u64 {
        self.shared.stats.failures()
    }

    /// Number of concurrent dispatches that haven't finished yet.
    pub fn in_flight(&self) -> usize {
        self.shared.stats.in_flight()
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }
}

impl<E: Event> Clone for Bus<E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E: Event> Default for Bus<E> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<E: Event> fmt::Debug for Bus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("config", &self.shared.config)
            .field("listeners", &self.len())
            .field("failures", &self.failure_count())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}
