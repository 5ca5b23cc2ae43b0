//! Run statistics: a thread-local [`LocalStats`] folded once, at thread
//! exit, into a shared [`SharedStats`], avoiding atomic contention on the
//! hot path (every successor processed).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Per-worker counters accumulated during one worker's lifetime.
///
/// Plain `u64` fields, no atomics: each worker owns its own `LocalStats` and
/// folds it into the shared totals exactly once, at thread exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStats {
    /// Nodes popped from the work queue (including any later found stale).
    pub visited: u64,
    /// Successors deactivated by direct (intra-batch) sibling covering.
    pub directly_covered: u64,
    /// Freshly computed successors discarded because an existing node covers them.
    pub covered_leaf: u64,
    /// Existing nodes subsumed and removed by a newly inserted successor.
    pub covered_nonleaf: u64,
    /// Accumulated wall-clock time spent inside the covering scan of `build_and_insert`.
    pub edge_check_time: Duration,
}

#[derive(Debug)]
pub(crate) struct SharedStats {
    visited: AtomicU64,
    directly_covered: AtomicU64,
    covered_leaf: AtomicU64,
    covered_nonleaf: AtomicU64,
    edge_check_nanos: AtomicU64,
    start: Instant,
}

impl SharedStats {
    pub(crate) fn new() -> Self {
        Self {
            visited: AtomicU64::new(0),
            directly_covered: AtomicU64::new(0),
            covered_leaf: AtomicU64::new(0),
            covered_nonleaf: AtomicU64::new(0),
            edge_check_nanos: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub(crate) fn fold(&self, local: &LocalStats) {
        self.visited.fetch_add(local.visited, Ordering::Relaxed);
        self.directly_covered
            .fetch_add(local.directly_covered, Ordering::Relaxed);
        self.covered_leaf
            .fetch_add(local.covered_leaf, Ordering::Relaxed);
        self.covered_nonleaf
            .fetch_add(local.covered_nonleaf, Ordering::Relaxed);
        self.edge_check_nanos.fetch_add(
            u64::try_from(local.edge_check_time.as_nanos()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );
    }

    pub(crate) fn finish(&self, stored: u64) -> Stats {
        Stats {
            visited: self.visited.load(Ordering::Relaxed),
            directly_covered: self.directly_covered.load(Ordering::Relaxed),
            covered_leaf: self.covered_leaf.load(Ordering::Relaxed),
            covered_nonleaf: self.covered_nonleaf.load(Ordering::Relaxed),
            stored,
            elapsed: self.start.elapsed(),
            edge_check_time: Duration::from_nanos(
                self.edge_check_nanos.load(Ordering::Relaxed),
            ),
        }
    }
}

/// Aggregate statistics returned alongside [`crate::Outcome`] by [`crate::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total nodes popped from the work queue across all workers.
    pub visited: u64,
    /// Total successors deactivated by direct sibling covering.
    pub directly_covered: u64,
    /// Total freshly computed successors discarded as covered leaves.
    pub covered_leaf: u64,
    /// Total existing nodes subsumed and removed by a later insertion.
    pub covered_nonleaf: u64,
    /// Number of nodes live in the cover graph when the run finished.
    pub stored: u64,
    /// Wall-clock time from coordinator start to the run's conclusion.
    pub elapsed: Duration,
    /// Aggregate time spent in covering scans across all workers.
    pub edge_check_time: Duration,
}
