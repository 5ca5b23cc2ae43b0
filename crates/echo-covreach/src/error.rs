//! Error taxonomy, matching the `ConfigError`/`CasError` shape used elsewhere
//! in this workspace (`echo-app-core::config::ConfigError`, `echo-cas::CasError`).

use thiserror::Error;

/// Configuration errors, raised by [`crate::EngineConfig::validate`] before
/// any worker thread is spawned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineConfigError {
    /// `threads` was zero; at least one worker (the coordinator's own thread) is required.
    #[error("threads must be at least 1")]
    ZeroThreads,
    /// `bucket_count` was zero; the cover graph needs at least one bucket.
    #[error("bucket_count must be at least 1")]
    ZeroBuckets,
    /// `block_size` was zero; it is used as an arena growth hint.
    #[error("block_size must be at least 1")]
    ZeroBlockSize,
}

/// Wraps a [`crate::StateSpace`] implementation's own error type.
///
/// Raised synchronously out of the worker thread that triggered it, either
/// while expanding a node's successors or while evaluating the covering
/// preorder.
#[derive(Debug, Error)]
pub enum StsError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// `StateSpace::initial` or `StateSpace::outgoing` failed.
    #[error("state space expansion failed: {0}")]
    Expand(#[source] E),
    /// `StateSpace::covers` failed.
    #[error("covering check failed: {0}")]
    Covers(#[source] E),
}

/// Top-level error returned by [`crate::run`].
#[derive(Debug, Error)]
pub enum ReachabilityError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The supplied [`crate::EngineConfig`] failed validation; no thread was started.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] EngineConfigError),
    /// A worker observed an error from the state space. Exhaustion is not an
    /// error; this variant is only ever raised for a genuine STS failure.
    #[error("state space failed: {0}")]
    Sts(#[from] StsError<E>),
}
