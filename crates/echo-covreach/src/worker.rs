//! The per-thread worker loop (§4.5): pop, check for acceptance, expand and
//! insert via the cover graph, then push the result back to the queue.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::cover_graph::{CoverGraph, Scratch};
use crate::error::StsError;
use crate::queue::{Popped, WorkQueue};
use crate::stats::{LocalStats, SharedStats};
use crate::sts::StateSpace;

/// Runs one worker's loop to completion.
///
/// Exits when the shared `reached` flag is set, when `abort` is set by some
/// other worker's STS failure, or when the work queue reports quiescence.
/// Folds this worker's [`LocalStats`] into `shared_stats` exactly once, on
/// every exit path.
pub(crate) fn run<S>(
    id: usize,
    mut sts: S,
    graph: &CoverGraph<S::Node>,
    queue: &WorkQueue,
    reached: &AtomicBool,
    abort: &AtomicBool,
    notify_every: u64,
    shared_stats: &SharedStats,
) -> Result<(), StsError<S::Error>>
where
    S: StateSpace,
{
    let span = tracing::info_span!("covreach.worker", id);
    let _enter = span.enter();

    let mut local = LocalStats::default();
    let mut scratch = Scratch::new();
    let mut batch = Vec::new();

    loop {
        if reached.load(Ordering::Acquire) || abort.load(Ordering::Acquire) {
            break;
        }

        let current = match queue.pop() {
            Popped::Node(handle) => handle,
            Popped::Done => break,
        };
        local.visited += 1;

        if notify_every > 0 && local.visited % notify_every == 0 {
            tracing::info!(
                visited = local.visited,
                stored = graph.live_node_count(),
                elapsed_ms = u64::try_from(shared_stats.elapsed().as_millis()).unwrap_or(u64::MAX),
                "covreach progress"
            );
        }

        let Some(node) = graph.node(current) else {
            // Covered between being enqueued and being popped; nothing to do.
            let mut empty = Vec::new();
            queue.push_and_release(&mut empty, true);
            continue;
        };

        if sts.is_accepting(&node) {
            reached.store(true, Ordering::Release);
            let mut empty = Vec::new();
            queue.push_and_release(&mut empty, true);
            break;
        }

        if let Err(err) =
            graph.build_and_insert(current, &mut sts, &mut scratch, &mut local, &mut batch)
        {
            abort.store(true, Ordering::Release);
            tracing::warn!(error = %err, "state space error, shutting down");
            let mut empty = Vec::new();
            queue.push_and_release(&mut empty, true);
            shared_stats.fold(&local);
            return Err(err);
        }

        queue.push_and_release(&mut batch, true);
    }

    shared_stats.fold(&local);
    Ok(())
}
