use std::fmt;

/// What the bus does when a listener panics during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Catch the panic, log and count it, and keep delivering to the
    /// remaining listeners. A blocking dispatch then reports the failures
    /// through [`Error::ListenersFailed`](crate::Error::ListenersFailed).
    #[default]
    Isolate,
    /// Let the panic unwind out of the fan-out. Listeners after the failing
    /// one are skipped. In blocking mode the caller of `call_event` sees the
    /// panic; in concurrent mode only the detached task ends.
    Propagate,
}

impl FailurePolicy {
    pub fn is_isolate(&self) -> bool {
        matches!(self, FailurePolicy::Isolate)
    }

    pub fn is_propagate(&self) -> bool {
        matches!(self, FailurePolicy::Propagate)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "Isolate"),
            FailurePolicy::Propagate => write!(f, "Propagate"),
        }
    }
}
