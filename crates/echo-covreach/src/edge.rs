//! Edge storage for the cover graph (§4.3.2).
//!
//! Conceptually each node carries two singly-linked intrusive lists,
//! `outgoing` and `incoming`, so that coverage migration is a pointer splice
//! with no allocation. This module gets the same asymptotics without unsafe
//! intrusive pointers: a single append-only arena (`Vec<EdgeRecord>`,
//! indices standing in for pointers) behind its own spinlock, acquired only
//! for the duration of one edge-list read or splice. See DESIGN.md for why a
//! dedicated edge lock was chosen over storing list heads inline per bucket.

use std::collections::HashMap;

use crate::cover_graph::NodeHandle;

/// The kind of a directed edge between two live nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// `target` is the exact successor of `source`.
    Actual,
    /// `target` subsumes the exact successor of `source`.
    Abstract,
}

/// A materialized edge, as returned by [`crate::CoverGraph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The edge's origin.
    pub source: NodeHandle,
    /// The edge's destination.
    pub target: NodeHandle,
    /// Whether `target` is the exact successor, or merely covers it.
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    source: NodeHandle,
    target: NodeHandle,
    kind: EdgeKind,
    next_out: Option<u32>,
    next_in: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Heads {
    out_head: Option<u32>,
    in_head: Option<u32>,
}

#[derive(Debug, Default)]
pub(crate) struct EdgeTable {
    edges: Vec<EdgeRecord>,
    heads: HashMap<NodeHandle, Heads>,
}

impl EdgeTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            heads: HashMap::new(),
        }
    }

    /// Adds `source -> target` of kind `kind`.
    ///
    /// When `check_existing` is set, an existing edge between the same
    /// ordered pair has its kind joined via `max(ACTUAL, ABSTRACT) = ACTUAL`
    /// instead of a duplicate edge being allocated (§4.3.3). Callers that
    /// already know the edge is unique (the target was just freshly
    /// inserted) pass `check_existing = false` to skip the scan.
    pub(crate) fn add_edge(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        kind: EdgeKind,
        check_existing: bool,
    ) {
        if check_existing {
            let mut cursor = self.heads.get(&source).and_then(|h| h.out_head);
            while let Some(idx) = cursor {
                let record = &mut self.edges[idx as usize];
                if record.target == target {
                    if kind == EdgeKind::Actual {
                        record.kind = EdgeKind::Actual;
                    }
                    return;
                }
                cursor = record.next_out;
            }
        }

        debug_assert!(
            self.edges.len() < u32::MAX as usize,
            "edge arena exceeded u32::MAX entries"
        );
        #[allow(clippy::cast_possible_truncation)]
        let idx = self.edges.len() as u32;
        let out_head = self.heads.entry(source).or_default().out_head;
        let in_head = self.heads.entry(target).or_default().in_head;
        self.edges.push(EdgeRecord {
            source,
            target,
            kind,
            next_out: out_head,
            next_in: in_head,
        });
        self.heads.entry(source).or_default().out_head = Some(idx);
        self.heads.entry(target).or_default().in_head = Some(idx);
    }

    /// Splices `from`'s outgoing edges onto `to`'s outgoing list, rewriting
    /// each edge's source in place. No edge payload is copied.
    pub(crate) fn migrate_outgoing(&mut self, from: NodeHandle, to: NodeHandle) {
        let Some(head) = self.heads.get_mut(&from).and_then(|h| h.out_head.take()) else {
            return;
        };
        let mut tail = head;
        loop {
            self.edges[tail as usize].source = to;
            match self.edges[tail as usize].next_out {
                Some(next) => tail = next,
                None => break,
            }
        }
        let to_heads = self.heads.entry(to).or_default();
        self.edges[tail as usize].next_out = to_heads.out_head;
        to_heads.out_head = Some(head);
    }

    /// Splices `from`'s incoming edges onto `to`'s incoming list, retyping
    /// each migrated edge as `ABSTRACT` and rewriting its target in place.
    pub(crate) fn migrate_incoming_as_abstract(&mut self, from: NodeHandle, to: NodeHandle) {
        let Some(head) = self.heads.get_mut(&from).and_then(|h| h.in_head.take()) else {
            return;
        };
        let mut tail = head;
        loop {
            let record = &mut self.edges[tail as usize];
            record.target = to;
            record.kind = EdgeKind::Abstract;
            match record.next_in {
                Some(next) => tail = next,
                None => break,
            }
        }
        let to_heads = self.heads.entry(to).or_default();
        self.edges[tail as usize].next_in = to_heads.in_head;
        to_heads.in_head = Some(head);
    }

    /// Drops the (by now empty) head-pointer entry for a removed node.
    pub(crate) fn retire(&mut self, handle: NodeHandle) {
        self.heads.remove(&handle);
    }

    /// Returns every edge currently recorded, regardless of endpoint liveness.
    ///
    /// Callers that need only edges between currently-live nodes (the
    /// public [`crate::CoverGraph::edges`] contract) filter this against the
    /// graph's own liveness check.
    pub(crate) fn all_edges(&self) -> Vec<Edge> {
        self.edges
            .iter()
            .map(|record| Edge {
                source: record.source,
                target: record.target,
                kind: record.kind,
            })
            .collect()
    }
}
