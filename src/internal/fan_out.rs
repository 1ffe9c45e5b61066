use std::{
    panic::{AssertUnwindSafe, catch_unwind, resume_unwind},
    sync::Arc,
};

use super::{SharedListener, Stats};
use crate::{DispatchId, Event, FailurePolicy, ListenerFailure, Payload};

/// One dispatch worth of work: the listener snapshot plus what's needed to
/// contain and account for failures.
pub(crate) struct FanOut<E: Event> {
    pub id: DispatchId,
    pub listeners: Arc<[SharedListener<E>]>,
    pub policy: FailurePolicy,
    pub stats: Arc<Stats>,
}

impl<E: Event> FanOut<E> {
    /// Invoke every listener in registration order with the same event and payload.
    ///
    /// Under `Isolate` every listener runs and the panics are returned.
    /// Under `Propagate` the first panic resumes unwinding after being counted.
    pub fn run(&self, event: &E, payload: &Payload) -> Vec<ListenerFailure> {
        let mut failures = Vec::new();
        for (index, listener) in self.listeners.iter().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| listener.react(event, payload)));
            let Err(panic) = result else {
                continue;
            };

            self.stats.record_failure();
            let failure = ListenerFailure::from_panic(index, event.name().into_owned(), &*panic);
            tracing::error!(
                dispatch_id = %self.id,
                listener = index,
                event = %failure.event,
                policy = %self.policy,
                "Listener panicked: {}",
                failure.message
            );

            if self.policy.is_propagate() {
                resume_unwind(panic);
            }
            failures.push(failure);
        }
        failures
    }
}
