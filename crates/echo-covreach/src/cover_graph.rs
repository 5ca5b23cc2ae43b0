//! The cover graph (§4.3): a bucketed container of live symbolic nodes,
//! keyed by a discrete fingerprint, with directed actual/abstract edges and
//! covering queries restricted to a bucket.
//!
//! Node storage uses per-bucket generational arenas (§3, §9 Design Notes)
//! rather than reference-counted handles: a [`NodeHandle`] is a small `Copy`
//! `(bucket, slot, generation)` triple, and staleness — a handle against a
//! slot that has since been freed and reused — is detected by generation
//! mismatch instead of policed refcount discipline. Edges live in a
//! dedicated arena (see [`crate::edge`]) behind their own spinlock, so a
//! bucket's own lock never needs to be held while mutating a different
//! bucket's edges.

use std::time::Instant;

use crate::edge::{Edge, EdgeKind, EdgeTable};
use crate::error::StsError;
use crate::spinlock::SpinLock;
use crate::stats::LocalStats;
use crate::sts::StateSpace;

/// A handle to a node once it has been inserted into the cover graph.
///
/// Stable for the lifetime of that particular insertion: once the node is
/// covered and its slot freed, the slot's generation is bumped and this
/// handle becomes stale (every lookup through it returns `None`/`false`
/// rather than aliasing the slot's next occupant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    bucket: usize,
    slot: usize,
    generation: u64,
}

impl NodeHandle {
    #[cfg(test)]
    pub(crate) fn for_test(bucket: usize, slot: usize, generation: u64) -> Self {
        Self {
            bucket,
            slot,
            generation,
        }
    }
}

struct Slot<N> {
    node: Option<N>,
    generation: u64,
}

struct Bucket<N> {
    slots: Vec<Slot<N>>,
    free: Vec<usize>,
}

impl<N> Bucket<N> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    fn insert(&mut self, node: N) -> (usize, u64) {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx];
            slot.node = Some(node);
            (idx, slot.generation)
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                node: Some(node),
                generation: 0,
            });
            (idx, 0)
        }
    }

    fn remove(&mut self, slot: usize) {
        let s = &mut self.slots[slot];
        s.node = None;
        s.generation = s.generation.wrapping_add(1);
        self.free.push(slot);
    }

    fn get(&self, slot: usize, generation: u64) -> Option<&N> {
        let s = self.slots.get(slot)?;
        if s.generation == generation {
            s.node.as_ref()
        } else {
            None
        }
    }

    fn generation_of(&self, slot: usize) -> u64 {
        self.slots[slot].generation
    }

    fn active_iter(&self) -> impl Iterator<Item = (usize, &N)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.node.as_ref().map(|n| (i, n)))
    }

    fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }
}

/// Per-worker scratch buffers reused across successive `build_and_insert`
/// calls, so a worker's steady-state loop performs no extra allocation per
/// node once the buffers have grown to their working size.
#[derive(Debug, Default)]
pub struct Scratch<N> {
    raw: Vec<N>,
    alive: Vec<bool>,
    treated: Vec<bool>,
    bucket_of: Vec<usize>,
}

impl<N> Scratch<N> {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.raw.clear();
        self.alive.clear();
        self.treated.clear();
        self.bucket_of.clear();
    }
}

/// A single pass of `build_and_insert` without forward progress for this
/// many consecutive full sweeps over the successor array triggers a brief
/// sleep, to break livelock between workers contending for overlapping
/// bucket sets (§4.3, step 6).
const STALL_LIMIT: u32 = 100;
const BACKOFF: std::time::Duration = std::time::Duration::from_micros(5);

/// Bucketed, lock-sharded store of live symbolic nodes and their edges.
pub struct CoverGraph<N> {
    buckets: Vec<SpinLock<Bucket<N>>>,
    edges: SpinLock<EdgeTable>,
}

impl<N: Clone> CoverGraph<N> {
    /// Creates a graph with `bucket_count` buckets, each pre-sized to hold
    /// roughly `block_size` nodes before its arena grows.
    #[must_use]
    pub fn new(bucket_count: usize, block_size: usize) -> Self {
        let buckets = (0..bucket_count.max(1))
            .map(|_| SpinLock::new(Bucket::with_capacity(block_size)))
            .collect();
        Self {
            buckets,
            edges: SpinLock::new(EdgeTable::with_capacity(block_size)),
        }
    }

    fn bucket_index<S: StateSpace<Node = N>>(&self, sts: &S, node: &N) -> usize {
        (sts.fingerprint(node) as usize) % self.buckets.len()
    }

    /// Inserts `node` into its bucket unconditionally. Used only to seed the
    /// initial frontier.
    pub fn add_initial<S: StateSpace<Node = N>>(&self, sts: &S, node: N) -> NodeHandle {
        let bucket = self.bucket_index(sts, &node);
        let (slot, generation) = self.buckets[bucket].lock().insert(node);
        NodeHandle {
            bucket,
            slot,
            generation,
        }
    }

    /// Returns whether `handle` still refers to a live node.
    #[must_use]
    pub fn is_active(&self, handle: NodeHandle) -> bool {
        self.node(handle).is_some()
    }

    /// Clones the node referred to by `handle`, or `None` if it has since
    /// been covered (or the handle is otherwise stale).
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<N> {
        self.buckets[handle.bucket]
            .lock()
            .get(handle.slot, handle.generation)
            .cloned()
    }

    /// Number of nodes currently live across all buckets.
    #[must_use]
    pub fn live_node_count(&self) -> u64 {
        self.buckets
            .iter()
            .map(|b| b.lock().active_count() as u64)
            .sum()
    }

    /// A read-only snapshot of every live node's handle and value.
    #[must_use]
    pub fn live_nodes(&self) -> Vec<(NodeHandle, N)> {
        let mut out = Vec::new();
        for (bucket_idx, bucket_lock) in self.buckets.iter().enumerate() {
            let bucket = bucket_lock.lock();
            for (slot, node) in bucket.active_iter() {
                out.push((
                    NodeHandle {
                        bucket: bucket_idx,
                        slot,
                        generation: bucket.generation_of(slot),
                    },
                    node.clone(),
                ));
            }
        }
        out
    }

    /// A read-only snapshot of every edge whose endpoints are both still live.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        // Bound so the edge-table guard drops before `is_active` takes a
        // bucket lock: every other path through this graph locks a bucket
        // before the edge table, and a live guard held across that call
        // would invert the order and deadlock against `resolve_successor`.
        let all = self.edges.lock().all_edges();
        all.into_iter()
            .filter(|edge| self.is_active(edge.source) && self.is_active(edge.target))
            .collect()
    }

    /// The central operation (§4.3): expands `parent` via `sts`, resolves
    /// each surviving successor against the cover graph, and appends every
    /// freshly-inserted handle to `out_batch` for the caller to enqueue.
    ///
    /// `out_batch` is cleared on entry. Returns `Ok(())` even when `parent`
    /// turns out to already be inactive; that is the expected outcome when a
    /// node is covered between being enqueued and being popped.
    pub fn build_and_insert<S>(
        &self,
        parent: NodeHandle,
        sts: &mut S,
        scratch: &mut Scratch<N>,
        local: &mut LocalStats,
        out_batch: &mut Vec<NodeHandle>,
    ) -> Result<(), StsError<S::Error>>
    where
        S: StateSpace<Node = N>,
    {
        out_batch.clear();
        scratch.reset();

        let Some(parent_node) = self.node(parent) else {
            return Ok(());
        };

        sts.outgoing(&parent_node, &mut scratch.raw)
            .map_err(StsError::Expand)?;
        let k = scratch.raw.len();
        scratch.alive.resize(k, true);
        scratch.treated.resize(k, false);
        scratch.bucket_of.resize(k, 0);

        // Step 3: direct covering among siblings. Order-independent because
        // `⊑` is a preorder; a mutual pair deactivates exactly one side (the
        // one visited first), per §4.3.4.
        for i in 0..k {
            if !scratch.alive[i] {
                continue;
            }
            for j in 0..k {
                if i == j || !scratch.alive[j] {
                    continue;
                }
                if sts
                    .covers(&scratch.raw[i], &scratch.raw[j])
                    .map_err(StsError::Covers)?
                {
                    scratch.alive[i] = false;
                    local.directly_covered += 1;
                    break;
                }
            }
        }

        // Step 4: bucket assignment. Dead siblings need no further work.
        for i in 0..k {
            if scratch.alive[i] {
                scratch.bucket_of[i] = self.bucket_index(sts, &scratch.raw[i]);
            } else {
                scratch.treated[i] = true;
            }
        }

        let edge_timer = Instant::now();
        let mut stall = 0_u32;
        loop {
            if self.node(parent).is_none() {
                // Parent was covered while we were expanding/resolving it.
                // Successors already inserted keep their place in the graph
                // (they are sound regardless of the parent's fate, by the
                // covering argument); untreated ones are simply dropped —
                // whatever covered the parent covers everything reachable
                // through it, modulo the preorder.
                local.edge_check_time += edge_timer.elapsed();
                return Ok(());
            }

            if scratch.treated.iter().all(|&t| t) {
                break;
            }

            let mut progressed = false;
            for i in 0..k {
                if scratch.treated[i] {
                    continue;
                }
                let target_idx = scratch.bucket_of[i];
                let Some(mut target_bucket) = self.buckets[target_idx].try_lock() else {
                    continue;
                };
                self.resolve_successor(
                    parent,
                    &mut target_bucket,
                    target_idx,
                    &scratch.raw[i],
                    sts,
                    local,
                    out_batch,
                )?;
                drop(target_bucket);
                scratch.treated[i] = true;
                progressed = true;
                stall = 0;
            }

            if !progressed {
                stall += 1;
                if stall >= STALL_LIMIT {
                    tracing::debug!(parent = ?parent, "bucket contention back-off");
                    std::thread::sleep(BACKOFF);
                    stall = 0;
                }
            }
        }

        local.edge_check_time += edge_timer.elapsed();
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_successor<S>(
        &self,
        parent: NodeHandle,
        target_bucket: &mut Bucket<N>,
        target_bucket_idx: usize,
        successor: &N,
        sts: &S,
        local: &mut LocalStats,
        out_batch: &mut Vec<NodeHandle>,
    ) -> Result<(), StsError<S::Error>>
    where
        S: StateSpace<Node = N>,
    {
        let mut covering_existing = None;
        for (slot, node) in target_bucket.active_iter() {
            if sts.covers(successor, node).map_err(StsError::Covers)? {
                covering_existing = Some(slot);
                break;
            }
        }

        if let Some(slot) = covering_existing {
            let covering = NodeHandle {
                bucket: target_bucket_idx,
                slot,
                generation: target_bucket.generation_of(slot),
            };
            self.edges
                .lock()
                .add_edge(parent, covering, EdgeKind::Abstract, true);
            local.covered_leaf += 1;
            return Ok(());
        }

        let (slot, generation) = target_bucket.insert(successor.clone());
        let new_handle = NodeHandle {
            bucket: target_bucket_idx,
            slot,
            generation,
        };
        self.edges
            .lock()
            .add_edge(parent, new_handle, EdgeKind::Actual, false);
        out_batch.push(new_handle);

        let mut covered = Vec::new();
        for (other_slot, node) in target_bucket.active_iter() {
            if other_slot == slot {
                continue;
            }
            if sts.covers(node, successor).map_err(StsError::Covers)? {
                covered.push(other_slot);
            }
        }

        for other_slot in covered {
            let covered_handle = NodeHandle {
                bucket: target_bucket_idx,
                slot: other_slot,
                generation: target_bucket.generation_of(other_slot),
            };
            target_bucket.remove(other_slot);
            let mut edges = self.edges.lock();
            edges.migrate_incoming_as_abstract(covered_handle, new_handle);
            edges.migrate_outgoing(covered_handle, new_handle);
            edges.retire(covered_handle);
            drop(edges);
            local.covered_nonleaf += 1;
        }

        Ok(())
    }
}
