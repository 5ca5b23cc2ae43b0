// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parallel covering-reachability engine for timed symbolic transition
//! systems.
//!
//! A multi-threaded engine that explores the symbolic state graph of a
//! caller-supplied [`StateSpace`] under a covering (subsumption) preorder,
//! terminating as soon as an accepting symbolic state is discovered or the
//! entire covering-reduced graph has been explored. Parsing a system
//! description, building a timed-automaton model, and the numeric zone
//! representation (difference-bound matrices, extrapolation) are all out of
//! scope — callers bring their own [`StateSpace`] implementation.
//!
//! ```
//! use echo_covreach::{run, EngineConfig};
//! use echo_covreach::testing::{LabeledGraph, SymbolicState};
//!
//! let s0 = SymbolicState::new(0);
//! let s1 = SymbolicState::new(1);
//! let sts = LabeledGraph::new()
//!     .with_initial(s0)
//!     .with_edge(s0, s1)
//!     .with_accepting(s1)
//!     .into_view();
//!
//! let result = run(&EngineConfig::new(), sts).expect("configuration is valid");
//! assert_eq!(result.outcome, echo_covreach::Outcome::Reachable);
//! ```
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod config;
mod coordinator;
mod cover_graph;
mod edge;
mod error;
mod queue;
mod spinlock;
mod stats;
mod sts;
mod worker;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{EngineConfig, QueueOrder};
pub use coordinator::{run, Outcome, RunResult};
pub use cover_graph::{CoverGraph, NodeHandle, Scratch};
pub use edge::{Edge, EdgeKind};
pub use error::{EngineConfigError, ReachabilityError, StsError};
pub use stats::{LocalStats, Stats};
pub use sts::StateSpace;
