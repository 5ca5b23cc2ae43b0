// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boundary behaviors B1-B3: an empty frontier, an accepting initial node,
//! and a strongly-connected accepting-free component collapsing to its
//! symbolic quotient.

#![allow(missing_docs)]

use echo_covreach::testing::{LabeledGraph, SymbolicState};
use echo_covreach::{run, EngineConfig, Outcome};

#[test]
fn empty_initial_set_exhausts_with_no_visits() {
    let view = LabeledGraph::new().into_view();

    let result = run(&EngineConfig::new(), view).expect("valid config");

    assert_eq!(result.outcome, Outcome::Exhausted);
    assert_eq!(result.stats.visited, 0);
}

#[test]
fn single_accepting_initial_node_is_reachable_without_expansion() {
    let s0 = SymbolicState::new(0);
    let s1 = SymbolicState::new(1);
    let view = LabeledGraph::new()
        .with_initial(s0)
        .with_edge(s0, s1)
        .with_accepting(s0)
        .into_view();

    let result = run(&EngineConfig::new(), view).expect("valid config");

    assert_eq!(result.outcome, Outcome::Reachable);
    assert_eq!(result.stats.visited, 1);
    assert_eq!(
        result.stats.stored, 1,
        "s1 must never be explored: the accepting check precedes expansion"
    );
}

#[test]
fn strongly_connected_accepting_free_component_exhausts_at_its_quotient() {
    // s0 -> s1 -> s0, no covering ties, nothing accepting. The symbolic
    // quotient under `⊑` is {s0, s1}: two classes.
    let s0 = SymbolicState::new(0);
    let s1 = SymbolicState::new(1);
    let view = LabeledGraph::new()
        .with_initial(s0)
        .with_edge(s0, s1)
        .with_edge(s1, s0)
        .into_view();

    let result = run(&EngineConfig::new().threads(1), view).expect("valid config");

    assert_eq!(result.outcome, Outcome::Exhausted);
    assert_eq!(result.stats.visited, 2);
    assert_eq!(result.stats.stored, 2);
}
