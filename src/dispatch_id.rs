use std::fmt;

use uuid::Uuid;

/// Unique identifier of a single `call_event` invocation.
///
/// Shows up in log records and in
/// [`Error::ListenersFailed`](crate::Error::ListenersFailed), so failures can be
/// tied back to the dispatch that caused them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchId(Uuid);

impl DispatchId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}
