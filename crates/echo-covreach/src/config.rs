//! Builder-validated engine configuration, in the shape of
//! `echo-app-core::config::ConfigService`: construct via `new`/`with_*`
//! setters, then call [`EngineConfig::validate`] once before use.

use crate::error::EngineConfigError;

/// Work queue discipline. `Bfs` explores breadth-first (FIFO); `Dfs`
/// explores depth-first (LIFO). Both satisfy the same termination contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    /// Breadth-first exploration (FIFO work queue).
    Bfs,
    /// Depth-first exploration (LIFO work queue).
    Dfs,
}

/// Engine tuning parameters.
///
/// Defaults: one thread, breadth-first order, 2^15 buckets, a block size of
/// 64, and no progress notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    threads: usize,
    order: QueueOrder,
    bucket_count: usize,
    block_size: usize,
    notify_every: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            order: QueueOrder::Bfs,
            bucket_count: 1 << 15,
            block_size: 64,
            notify_every: 0,
        }
    }
}

impl EngineConfig {
    /// Starts from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads (including the coordinator's own).
    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the work queue discipline.
    #[must_use]
    pub fn order(mut self, order: QueueOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the number of buckets in the cover graph.
    #[must_use]
    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Sets the arena growth increment for node and edge storage.
    #[must_use]
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets how often (in visited nodes) a progress event is emitted.
    /// Zero disables progress notifications.
    #[must_use]
    pub fn notify_every(mut self, notify_every: u64) -> Self {
        self.notify_every = notify_every;
        self
    }

    pub(crate) fn threads_count(&self) -> usize {
        self.threads
    }

    pub(crate) fn queue_order(&self) -> QueueOrder {
        self.order
    }

    pub(crate) fn buckets(&self) -> usize {
        self.bucket_count
    }

    pub(crate) fn arena_block_size(&self) -> usize {
        self.block_size
    }

    pub(crate) fn notify_interval(&self) -> u64 {
        self.notify_every
    }

    /// Validates the configuration, rejecting zero threads, buckets, or
    /// block size. Run once, before any worker thread is spawned.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.threads == 0 {
            return Err(EngineConfigError::ZeroThreads);
        }
        if self.bucket_count == 0 {
            return Err(EngineConfigError::ZeroBuckets);
        }
        if self.block_size == 0 {
            return Err(EngineConfigError::ZeroBlockSize);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::new().validate().is_ok());
    }

    #[test]
    fn zero_threads_is_rejected() {
        let err = EngineConfig::new().threads(0).validate().unwrap_err();
        assert_eq!(err, EngineConfigError::ZeroThreads);
    }

    #[test]
    fn zero_buckets_is_rejected() {
        let err = EngineConfig::new().bucket_count(0).validate().unwrap_err();
        assert_eq!(err, EngineConfigError::ZeroBuckets);
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let err = EngineConfig::new().block_size(0).validate().unwrap_err();
        assert_eq!(err, EngineConfigError::ZeroBlockSize);
    }
}
