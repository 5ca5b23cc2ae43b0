//! The symbolic transition system contract (§4.2): the external collaborator
//! supplying initial states, successors, and the covering preorder.
//!
//! Parsing a system description, building a timed-automaton model, and the
//! numeric zone representation (difference-bound matrices, extrapolation)
//! are all out of scope here; a `StateSpace` implementation owns all of
//! that, the engine only ever calls through this trait.

/// A symbolic transition system, viewed by one worker thread.
///
/// A conforming implementation must be cloneable into `N` thread-local views
/// (via [`StateSpace::clone_view`]) that share state-node memory but own
/// independent transition memory: expanding a node in one view must not
/// mutate anything visible to another view. Outside of that cloning, a
/// `StateSpace` is not required to be thread-safe — the engine only ever
/// touches one view from one thread at a time.
///
/// `covers` must be reflexive and transitive, and must agree with
/// `fingerprint`: if `covers(a, b)` holds, `a` and `b` must share a
/// fingerprint, since the cover graph only ever compares nodes within the
/// same bucket. `covers` must also be monotone with respect to the accepting
/// predicate: if `covers(a, b)` and `is_accepting(a)`, then `is_accepting(b)`.
pub trait StateSpace: Sized {
    /// An opaque symbolic state. Must be cheap to clone; the engine clones
    /// it whenever it needs a second copy of a value already in the graph.
    type Node: Clone;

    /// The state space's own error type, surfaced through [`crate::StsError`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the initial symbolic states.
    fn initial(&self) -> Result<Vec<Self::Node>, Self::Error>;

    /// Appends `node`'s successors to `out`. `out` is guaranteed empty on entry.
    fn outgoing(&mut self, node: &Self::Node, out: &mut Vec<Self::Node>) -> Result<(), Self::Error>;

    /// Decides whether `a ⊑ b` under the covering preorder.
    fn covers(&self, a: &Self::Node, b: &Self::Node) -> Result<bool, Self::Error>;

    /// Returns a discrete fingerprint for `node`, reduced modulo the bucket
    /// count to select a bucket. Nodes where one covers the other must share
    /// a fingerprint.
    fn fingerprint(&self, node: &Self::Node) -> u64;

    /// Returns whether `node` satisfies the accepting predicate.
    fn is_accepting(&self, node: &Self::Node) -> bool;

    /// Creates an independent view sharing node storage but owning its own
    /// transition memory.
    fn clone_view(&self) -> Self;
}
