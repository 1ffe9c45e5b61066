use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Event, Listener};

pub(crate) type SharedListener<E> = Arc<dyn Listener<E>>;

/// Append-only listener sequence with a cached dispatch snapshot.
///
/// Registration appends to a `Vec` and drops the cached snapshot. The first
/// dispatch after that builds a fresh `Arc<[..]>`, which later dispatches
/// share until the next registration. Dispatches never hold the lock while
/// listeners run, and one already underway keeps the slice it started with.
pub(crate) struct ListenerRegistry<E: Event> {
    inner: RwLock<Inner<E>>,
}

struct Inner<E: Event> {
    listeners: Vec<SharedListener<E>>,
    snapshot: Option<Arc<[SharedListener<E>]>>,
}

impl<E: Event> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                listeners: Vec::new(),
                snapshot: None,
            }),
        }
    }

    /// Append one listener and return the new length.
    pub fn push(&self, listener: SharedListener<E>) -> usize {
        let mut inner = self.write();
        inner.listeners.push(listener);
        inner.snapshot = None;
        inner.listeners.len()
    }

    /// Append in the given order and return the new length.
    ///
    /// An empty batch leaves the sequence and its snapshot untouched.
    pub fn extend(&self, batch: Vec<SharedListener<E>>) -> usize {
        let mut inner = self.write();
        if !batch.is_empty() {
            inner.listeners.extend(batch);
            inner.snapshot = None;
        }
        inner.listeners.len()
    }

    /// The listeners registered at this moment.
    pub fn snapshot(&self) -> Arc<[SharedListener<E>]> {
        if let Some(snapshot) = &self.read().snapshot {
            return snapshot.clone();
        }
        let mut inner = self.write();
        let Inner {
            listeners,
            snapshot,
        } = &mut *inner;
        snapshot
            .get_or_insert_with(|| Arc::from(listeners.as_slice()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.read().listeners.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<E>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<E>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
