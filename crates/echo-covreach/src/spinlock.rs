//! Single-acquirer mutual exclusion primitive with a non-blocking try-acquire.
//!
//! Bucket and edge-table critical sections in the cover graph are a handful of
//! index/pointer operations; a futex-backed [`std::sync::Mutex`] would add
//! latency here without reducing contention at realistic bucket counts. This
//! is the one module in the crate that needs `unsafe`, scoped to a single
//! `UnsafeCell` access pattern behind an atomic flag.
#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

/// A spinlock protecting a `T`.
///
/// Acquisition spins on an atomic compare-exchange with acquire ordering;
/// release is a store with release ordering. Fairness is not guaranteed. The
/// lock is non-reentrant: locking it twice from the same thread deadlocks.
pub struct SpinLock<T: ?Sized> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
}

// SAFETY: `SpinLock<T>` only ever hands out access to `T` through a guard
// obtained while `locked` is exclusively held by the calling thread, so it is
// safe to share across threads whenever `T: Send`.
unsafe impl<T: ?Sized + Send> Send for SpinLock<T> {}
unsafe impl<T: ?Sized + Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    /// Creates a new spinlock in the unlocked state.
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(value),
        }
    }

    /// Consumes the lock, returning the protected value.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> SpinLock<T> {
    /// Acquires the lock, spinning until it is available.
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
        SpinLockGuard { lock: self }
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// Returns `None` immediately if the lock is currently held.
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| SpinLockGuard { lock: self })
    }

    /// Returns a mutable reference to the protected value, bypassing the lock.
    ///
    /// Requires `&mut self`, so the borrow checker already guarantees
    /// exclusive access; no locking is needed.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<T: Default> Default for SpinLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for SpinLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_lock() {
            Some(guard) => f.debug_struct("SpinLock").field("data", &*guard).finish(),
            None => f
                .debug_struct("SpinLock")
                .field("data", &format_args!("<locked>"))
                .finish(),
        }
    }
}

/// RAII guard returned by [`SpinLock::lock`] and [`SpinLock::try_lock`].
///
/// Releases the lock when dropped.
pub struct SpinLockGuard<'a, T: ?Sized> {
    lock: &'a SpinLock<T>,
}

impl<T: ?Sized> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: holding a `SpinLockGuard` implies `locked` was set by this
        // thread and not yet released, so no other guard can alias `data`.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T: ?Sized> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: see `Deref` above; exclusivity holds for `&mut` too.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T: ?Sized> Drop for SpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn lock_protects_data() {
        let lock = SpinLock::new(0);
        *lock.lock() += 1;
        assert_eq!(*lock.lock(), 1);
    }

    #[test]
    fn try_lock_fails_while_held() {
        let lock = SpinLock::new(());
        let guard = lock.lock();
        assert!(lock.try_lock().is_none());
        drop(guard);
        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn smoke_many_threads() {
        let counter = Arc::new(SpinLock::new(0_u64));
        std::thread::scope(|scope| {
            for _ in 0..64 {
                let counter = Arc::clone(&counter);
                scope.spawn(move || {
                    for _ in 0..1000 {
                        *counter.lock() += 1;
                    }
                });
            }
        });
        assert_eq!(*counter.lock(), 64_000);
    }
}
