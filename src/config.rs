use std::sync::Arc;

use crate::FailurePolicy;

/// Bus configuration.
///
/// Fixed once the bus is built. Use the builder methods to customize, or
/// [`Default`] for a blocking bus that isolates listener failures.
///
/// # Examples
///
/// ```rust
/// use listenbus::{Bus, BasicEvent, Config, FailurePolicy};
///
/// let config = Config::default()
///     .with_concurrent_dispatch(true)              // Fire-and-forget fan-out
///     .with_failure_policy(FailurePolicy::Isolate) // One bad listener can't starve the rest
///     .with_thread_name("ui-events");
///
/// let bus = Bus::<BasicEvent>::with_config(config);
/// assert!(bus.is_concurrent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// When `true`, `call_event` detaches the whole fan-out as one task and
    /// returns immediately. When `false`, listeners run on the caller's thread.
    /// Default: false
    pub concurrent_dispatch: bool,

    /// How a panicking listener is handled.
    /// Default: [`FailurePolicy::Isolate`]
    pub failure_policy: FailurePolicy,

    /// Name given to the OS thread of a concurrent dispatch when no tokio
    /// runtime is available to host it.
    /// Default: "listenbus-dispatch"
    pub thread_name: Arc<str>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            concurrent_dispatch: false,
            failure_policy: FailurePolicy::default(),
            thread_name: Arc::from("listenbus-dispatch"),
        }
    }
}

impl Config {
    /// Choose between blocking (`false`) and concurrent (`true`) dispatch.
    pub fn with_concurrent_dispatch(mut self, enabled: bool) -> Self {
        self.concurrent_dispatch = enabled;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the name of fallback dispatch threads.
    ///
    /// Only used when a concurrent dispatch happens outside a tokio runtime.
    pub fn with_thread_name<N>(mut self, name: N) -> Self
    where
        N: Into<Arc<str>>,
    {
        self.thread_name = name.into();
        self
    }
}
