use std::sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

/// Counters shared by a bus and its detached dispatch tasks.
#[derive(Debug, Default)]
pub(crate) struct Stats {
    failures: AtomicU64,
    in_flight: AtomicUsize,
}

impl Stats {
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Marks one concurrent dispatch as running until dropped.
///
/// Dropped on every exit path of the task, including unwinding and the task
/// being discarded before it starts.
#[derive(Debug)]
pub(crate) struct InFlight(Arc<Stats>);

impl InFlight {
    pub fn enter(stats: &Arc<Stats>) -> Self {
        stats.in_flight.fetch_add(1, Ordering::AcqRel);
        Self(stats.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard() {
        let stats = Arc::new(Stats::default());
        let a = InFlight::enter(&stats);
        let b = InFlight::enter(&stats);
        assert_eq!(stats.in_flight(), 2);
        drop(a);
        assert_eq!(stats.in_flight(), 1);
        drop(b);
        assert_eq!(stats.in_flight(), 0);
    }

    #[test]
    fn test_failure_counter() {
        let stats = Stats::default();
        stats.record_failure();
        stats.record_failure();
        assert_eq!(stats.failures(), 2);
    }
}
