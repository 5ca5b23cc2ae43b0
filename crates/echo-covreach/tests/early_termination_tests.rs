// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scenario 6: a reachable graph far too large to fully explore (a binary
//! tree grown on demand rather than materialized up front) with a single
//! accepting node a few levels down. A correct engine must stop almost
//! immediately instead of exhausting the tree.
//!
//! This also doubles as the crate's example of implementing [`StateSpace`]
//! outside the bundled reference fixture.

#![allow(missing_docs)]

use std::convert::Infallible;

use echo_covreach::{run, EngineConfig, Outcome, QueueOrder, StateSpace};

/// A node of an (effectively) unbounded binary tree, numbered so that node
/// `id`'s children are `2*id + 1` and `2*id + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TreeNode {
    id: u64,
    depth: u32,
}

#[derive(Debug, Clone)]
struct BinaryTree {
    max_depth: u32,
    accepting_id: u64,
}

impl StateSpace for BinaryTree {
    type Node = TreeNode;
    type Error = Infallible;

    fn initial(&self) -> Result<Vec<TreeNode>, Infallible> {
        Ok(vec![TreeNode { id: 0, depth: 0 }])
    }

    fn outgoing(&mut self, node: &TreeNode, out: &mut Vec<TreeNode>) -> Result<(), Infallible> {
        if node.depth < self.max_depth {
            out.push(TreeNode {
                id: 2 * node.id + 1,
                depth: node.depth + 1,
            });
            out.push(TreeNode {
                id: 2 * node.id + 2,
                depth: node.depth + 1,
            });
        }
        Ok(())
    }

    fn covers(&self, a: &TreeNode, b: &TreeNode) -> Result<bool, Infallible> {
        Ok(a == b)
    }

    fn fingerprint(&self, node: &TreeNode) -> u64 {
        node.id
    }

    fn is_accepting(&self, node: &TreeNode) -> bool {
        node.id == self.accepting_id
    }

    fn clone_view(&self) -> Self {
        self.clone()
    }
}

#[test]
fn accepting_node_a_few_levels_down_terminates_early() {
    // Depth 25 alone holds over 2^25 (33M+) reachable nodes; the tree as a
    // whole is far larger still. Node 10 sits at depth 3 (ids 7..=14).
    let sts = BinaryTree {
        max_depth: 25,
        accepting_id: 10,
    };

    let config = EngineConfig::new().threads(4).order(QueueOrder::Bfs);
    let result = run(&config, sts).expect("valid config");

    assert_eq!(result.outcome, Outcome::Reachable);
    assert!(
        result.stats.visited < 1_000,
        "expected early termination, visited {} nodes",
        result.stats.visited
    );
}
