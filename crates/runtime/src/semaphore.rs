// SPDX-License-Identifier: MIT

//! Bounded counting semaphore (component C2).
//!
//! Wraps `tokio::sync::Semaphore` but exposes the manual acquire/release
//! API spec.md §4.2 calls for, rather than RAII permit guards: the executor
//! (spec.md §4.3) acquires once per task and releases in its `finally`
//! block regardless of which step the task failed in, which reads more
//! plainly with an explicit `release()` than threading a guard through
//! every early-return path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore as TokioSemaphore;

/// Counting semaphore initialized with `n = effective coreSize`.
pub struct BoundedSemaphore {
    inner: TokioSemaphore,
    /// Permits currently held by callers, tracked separately from
    /// `inner`'s internal count so [`Self::release`] can detect and reject
    /// an over-release instead of silently under/overflowing.
    outstanding: AtomicUsize,
}

impl BoundedSemaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            inner: TokioSemaphore::new(permits),
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Blocks until a permit is free.
    pub async fn acquire(&self) {
        // forget() hands the permit's lifetime to the caller; release()
        // gives it back explicitly via add_permits, matching the spec's
        // manual Acquire/Release contract rather than RAII.
        let permit = self
            .inner
            .acquire()
            .await
            .unwrap_or_else(|_| unreachable!("semaphore is never closed"));
        permit.forget();
        self.outstanding.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns true if a permit was obtained within `timeout`, else false.
    pub async fn try_acquire(&self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.inner.acquire()).await {
            Ok(Ok(permit)) => {
                permit.forget();
                self.outstanding.fetch_add(1, Ordering::SeqCst);
                true
            }
            Ok(Err(_)) => unreachable!("semaphore is never closed"),
            Err(_elapsed) => false,
        }
    }

    /// Returns a permit. Releasing more than were acquired is a programmer
    /// error and must fail loudly.
    #[allow(clippy::panic)]
    pub fn release(&self) {
        let previous = self.outstanding.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            n.checked_sub(1)
        });
        match previous {
            Ok(_) => self.inner.add_permits(1),
            Err(_) => panic!("BoundedSemaphore::release called without a matching acquire"),
        }
    }

    /// Current count of permits held by callers (for diagnostics/tests).
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Current count of free permits (for diagnostics/tests).
    pub fn available(&self) -> usize {
        self.inner.available_permits()
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
