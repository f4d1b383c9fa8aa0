// SPDX-License-Identifier: MIT

//! Clock abstraction so task timing fields are testable without sleeping
//! real time.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of "now" for task timing fields. Production code uses
/// [`SystemClock`]; tests inject [`FakeClock`] so `startTime`/`finishTime`
/// assertions don't depend on wall-clock timing.
pub trait Clock: Clone + Send + Sync + 'static {
    /// A monotonic instant, used for elapsed-time calculations.
    fn now(&self) -> Instant;

    /// Epoch milliseconds, used for the persisted `startTime`/`finishTime`
    /// fields on [`crate::TaskInfo`].
    fn epoch_ms(&self) -> u64;
}

/// Real wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests: starts at a fixed epoch and only advances
/// when [`FakeClock::advance`] is called explicitly.
#[derive(Debug, Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockState>>,
}

struct FakeClockState {
    epoch_ms: u64,
    base: Instant,
    elapsed_ms: u64,
}

impl FakeClock {
    pub fn new(start_epoch_ms: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeClockState {
                epoch_ms: start_epoch_ms,
                base: Instant::now(),
                elapsed_ms: 0,
            })),
        }
    }

    /// Advance the fake clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        let mut state = self.inner.lock();
        state.epoch_ms += ms;
        state.elapsed_ms += ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        let state = self.inner.lock();
        state.base + std::time::Duration::from_millis(state.elapsed_ms)
    }

    fn epoch_ms(&self) -> u64 {
        self.inner.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
