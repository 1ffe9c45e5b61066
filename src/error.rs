use std::{any::Any, fmt};

use crate::DispatchId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} listener(s) panicked while handling dispatch {dispatch_id}", .failures.len())]
    ListenersFailed {
        dispatch_id: DispatchId,
        failures: Vec<ListenerFailure>,
    },

    #[error("Couldn't spawn the dispatch thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl Error {
    /// Failures recorded for a dispatch, empty for other errors.
    pub fn failures(&self) -> &[ListenerFailure] {
        match self {
            Error::ListenersFailed { failures, .. } => failures,
            Error::Spawn(_) => &[],
        }
    }
}

/// A listener that panicked during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Position of the listener in registration order.
    pub index: usize,
    /// Name of the event being dispatched.
    pub event: String,
    /// The panic message, when the panic carried a string.
    pub message: String,
}

impl ListenerFailure {
    pub(crate) fn from_panic(index: usize, event: String, panic: &(dyn Any + Send)) -> Self {
        Self {
            index,
            event,
            message: panic_message(panic),
        }
    }
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "listener #{} panicked on '{}': {}",
            self.index, self.event, self.message
        )
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}
