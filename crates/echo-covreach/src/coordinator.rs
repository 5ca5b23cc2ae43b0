//! The coordinator (§4.6): seeds the initial frontier, launches workers, and
//! aggregates statistics into the final outcome.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::EngineConfig;
use crate::cover_graph::CoverGraph;
use crate::error::{ReachabilityError, StsError};
use crate::queue::WorkQueue;
use crate::stats::{SharedStats, Stats};
use crate::sts::StateSpace;
use crate::worker;

/// The result of a reachability run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Some node satisfying the accepting predicate was reached.
    Reachable,
    /// The entire (covering-reduced) reachable graph was explored without
    /// finding an accepting node.
    Exhausted,
}

/// The return value of [`run`]: the outcome plus aggregated statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// Whether an accepting node was reached.
    pub outcome: Outcome,
    /// Aggregated counters for the run.
    pub stats: Stats,
}

/// Explores `sts`'s reachable state graph under the covering preorder,
/// stopping as soon as an accepting node is found or the graph is
/// exhausted.
///
/// `seed_sts` is consumed: it becomes the coordinator's own worker's view,
/// after being cloned (via [`StateSpace::clone_view`]) once per additional
/// worker thread.
///
/// # Errors
///
/// Returns [`ReachabilityError::Config`] if `config` fails validation (no
/// thread is started in that case), or [`ReachabilityError::Sts`] if any
/// worker's state space raised an error — the first one observed across all
/// threads; the engine logs and discards the rest.
pub fn run<S>(config: &EngineConfig, seed_sts: S) -> Result<RunResult, ReachabilityError<S::Error>>
where
    S: StateSpace + Send,
    S::Node: Send,
{
    config.validate()?;

    let graph: CoverGraph<S::Node> = CoverGraph::new(config.buckets(), config.arena_block_size());
    let queue = WorkQueue::new(config.queue_order());
    let reached = AtomicBool::new(false);
    let abort = AtomicBool::new(false);
    let shared_stats = SharedStats::new();
    let notify_every = config.notify_interval();

    let initial = seed_sts
        .initial()
        .map_err(StsError::Expand)
        .map_err(ReachabilityError::Sts)?;
    let seeded: Vec<_> = initial
        .into_iter()
        .map(|node| graph.add_initial(&seed_sts, node))
        .collect();
    queue.seed(seeded);

    let mut first_error = None;
    std::thread::scope(|scope| {
        let threads = config.threads_count();
        let mut handles = Vec::with_capacity(threads.saturating_sub(1));
        for id in 1..threads {
            let view = seed_sts.clone_view();
            let graph = &graph;
            let queue = &queue;
            let reached = &reached;
            let abort = &abort;
            let stats = &shared_stats;
            handles.push(scope.spawn(move || {
                worker::run(id, view, graph, queue, reached, abort, notify_every, stats)
            }));
        }

        let own_result = worker::run(
            0,
            seed_sts,
            &graph,
            &queue,
            &reached,
            &abort,
            notify_every,
            &shared_stats,
        );
        if let Err(err) = own_result {
            first_error = Some(err);
        }

        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    } else {
                        tracing::warn!("discarding secondary state space error");
                    }
                }
                Err(_) => {
                    tracing::warn!("worker thread panicked");
                }
            }
        }
    });

    if let Some(err) = first_error {
        return Err(ReachabilityError::Sts(err));
    }

    let outcome = if reached.load(Ordering::Acquire) {
        Outcome::Reachable
    } else {
        Outcome::Exhausted
    };
    let stored = graph.live_node_count();
    Ok(RunResult {
        outcome,
        stats: shared_stats.finish(stored),
    })
}
