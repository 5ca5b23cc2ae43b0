//! A minimal in-memory [`StateSpace`] implementation used by this crate's
//! own tests, and available to downstream crates that want to exercise the
//! engine without a real zone library (§14).
//!
//! Parsing, the timed-automaton model, and the numeric zone representation
//! are explicit Non-goals of the engine itself; this is the engine's
//! equivalent of `rmg-core`'s `motion_rule` demo fixture — enough to drive
//! deterministic, assertable tests, not a production model. Not exported
//! outside `cfg(test)` / the `testing` feature.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;

use crate::sts::StateSpace;

/// A symbolic state for the reference state space: a node identity paired
/// with a fingerprint. Two states sharing a fingerprint are candidates for
/// covering; distinct identities let a test express "two different nodes,
/// same bucket" (as in scenario 3's covered sibling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolicState {
    id: u64,
    fingerprint: u64,
}

impl SymbolicState {
    /// A state whose fingerprint equals its identity.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fingerprint: id,
        }
    }

    /// A state with an explicit fingerprint, independent of its identity —
    /// use this to put two distinct states in the same bucket.
    #[must_use]
    pub fn with_fingerprint(id: u64, fingerprint: u64) -> Self {
        Self { id, fingerprint }
    }
}

/// Builds a [`LabeledGraphView`] by declaring initial states, edges, an
/// explicit covering relation, and an accepting set.
#[derive(Debug, Clone, Default)]
pub struct LabeledGraph {
    initial: Vec<SymbolicState>,
    edges: Vec<(SymbolicState, SymbolicState)>,
    covers: HashSet<(SymbolicState, SymbolicState)>,
    accepting: HashSet<SymbolicState>,
}

impl LabeledGraph {
    /// Starts an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `state` as an initial state.
    #[must_use]
    pub fn with_initial(mut self, state: SymbolicState) -> Self {
        self.initial.push(state);
        self
    }

    /// Declares an edge `from -> to`.
    #[must_use]
    pub fn with_edge(mut self, from: SymbolicState, to: SymbolicState) -> Self {
        self.edges.push((from, to));
        self
    }

    /// Declares `a ⊑ b`.
    #[must_use]
    pub fn with_covering(mut self, a: SymbolicState, b: SymbolicState) -> Self {
        self.covers.insert((a, b));
        self
    }

    /// Declares `state` as accepting.
    #[must_use]
    pub fn with_accepting(mut self, state: SymbolicState) -> Self {
        self.accepting.insert(state);
        self
    }

    /// Finalizes the graph into a shareable, cloneable view.
    #[must_use]
    pub fn into_view(self) -> LabeledGraphView {
        LabeledGraphView {
            graph: Arc::new(self),
        }
    }
}

/// A cloneable view over a [`LabeledGraph`]. Every clone shares the same
/// underlying graph (it is read-only once built), matching the
/// "shared node storage, independent transition storage" contract of
/// [`StateSpace::clone_view`] trivially, since there is no per-view
/// transition memory to separate.
#[derive(Debug, Clone)]
pub struct LabeledGraphView {
    graph: Arc<LabeledGraph>,
}

impl StateSpace for LabeledGraphView {
    type Node = SymbolicState;
    type Error = Infallible;

    fn initial(&self) -> Result<Vec<SymbolicState>, Infallible> {
        Ok(self.graph.initial.clone())
    }

    fn outgoing(
        &mut self,
        node: &SymbolicState,
        out: &mut Vec<SymbolicState>,
    ) -> Result<(), Infallible> {
        out.extend(
            self.graph
                .edges
                .iter()
                .filter(|(from, _)| from == node)
                .map(|(_, to)| *to),
        );
        Ok(())
    }

    fn covers(&self, a: &SymbolicState, b: &SymbolicState) -> Result<bool, Infallible> {
        Ok(a == b || self.graph.covers.contains(&(*a, *b)))
    }

    fn fingerprint(&self, node: &SymbolicState) -> u64 {
        node.fingerprint
    }

    fn is_accepting(&self, node: &SymbolicState) -> bool {
        self.graph.accepting.contains(node)
    }

    fn clone_view(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
        }
    }
}
