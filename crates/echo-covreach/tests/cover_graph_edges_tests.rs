// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario 4 (diamond collapse) and the covering-soundness invariant I6,
//! driven directly against [`CoverGraph`] rather than through the
//! coordinator, so the produced edge set can be inspected.

#![allow(missing_docs)]

use std::collections::HashSet;

use echo_covreach::testing::{LabeledGraph, SymbolicState};
use echo_covreach::{CoverGraph, EdgeKind, LocalStats, NodeHandle, Scratch, StateSpace};
use echo_covreach::testing::LabeledGraphView;

/// Drains `queue` against `graph` single-threaded, mirroring the worker loop
/// without the queue/coordinator machinery, so tests can inspect the graph
/// once exploration is complete.
fn drain(graph: &CoverGraph<SymbolicState>, mut sts: LabeledGraphView, mut queue: Vec<NodeHandle>) {
    let mut scratch = Scratch::new();
    let mut local = LocalStats::default();
    let mut batch = Vec::new();
    while let Some(parent) = queue.pop() {
        graph
            .build_and_insert(parent, &mut sts, &mut scratch, &mut local, &mut batch)
            .expect("infallible state space");
        queue.extend(batch.drain(..));
    }
}

fn diamond_view() -> (LabeledGraphView, SymbolicState) {
    let s0 = SymbolicState::new(0);
    let s1 = SymbolicState::new(1);
    let s2 = SymbolicState::new(2);
    let s3 = SymbolicState::new(3);
    let view = LabeledGraph::new()
        .with_initial(s0)
        .with_edge(s0, s1)
        .with_edge(s0, s2)
        .with_edge(s1, s3)
        .with_edge(s2, s3)
        .into_view();
    (view, s0)
}

#[test]
fn diamond_collapses_to_one_representative_via_abstract_edge() {
    let (view, s0) = diamond_view();

    let graph: CoverGraph<SymbolicState> = CoverGraph::new(8, 4);
    let seed = graph.add_initial(&view, s0);
    drain(&graph, view.clone_view(), vec![seed]);

    assert_eq!(graph.live_node_count(), 4, "s0, s1, s2, and one copy of s3");

    let edges = graph.edges();
    assert!(
        edges.iter().any(|e| e.kind == EdgeKind::Abstract),
        "the second path into s3 must be recorded as an ABSTRACT edge"
    );

    // At most one edge of each kind between any ordered pair (§6 "Produced graph").
    let mut seen = HashSet::new();
    for edge in &edges {
        assert!(
            seen.insert((edge.source, edge.target, edge.kind)),
            "duplicate edge of the same kind between an ordered pair"
        );
    }
}

#[test]
fn covering_edges_satisfy_soundness() {
    // I6: every ACTUAL edge's target is a genuine STS successor of its
    // source; every ABSTRACT edge's target covers a genuine successor.
    let (view, s0) = diamond_view();

    let graph: CoverGraph<SymbolicState> = CoverGraph::new(8, 4);
    let seed = graph.add_initial(&view, s0);
    let mut sts = view.clone_view();
    drain(&graph, sts.clone_view(), vec![seed]);

    for edge in graph.edges() {
        let source_node = graph.node(edge.source).expect("source is live");
        let mut successors = Vec::new();
        sts.outgoing(&source_node, &mut successors)
            .expect("infallible");
        let target_node = graph.node(edge.target).expect("target is live");
        match edge.kind {
            EdgeKind::Actual => assert!(
                successors.iter().any(|s| *s == target_node),
                "ACTUAL edge target must be an exact successor"
            ),
            EdgeKind::Abstract => assert!(
                successors
                    .iter()
                    .any(|s| view.covers(s, &target_node).unwrap_or(false)),
                "ABSTRACT edge target must cover a genuine successor"
            ),
        }
    }
}
