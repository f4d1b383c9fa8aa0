// SPDX-License-Identifier: MIT

//! Level-triggered "work available" signal for the dispatcher loop
//! (spec.md §4.3, design note "Level-triggered wake signal").
//!
//! A bare `tokio::sync::Notify` only remembers one outstanding permit and is
//! edge-triggered at the call site: if `signal()` fires while the dispatcher
//! is between its drain loop and the next `wait()` call (not yet parked on
//! `notified()`), a pulse-only design could lose it. The `armed` flag makes
//! the signal persist until a `wait()` actually observes it.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

#[derive(Default)]
pub struct WorkSignal {
    armed: AtomicBool,
    notify: Notify,
}

impl WorkSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark work as available and wake a waiter if one is parked.
    pub fn signal(&self) {
        self.armed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Returns once work is available, consuming the signal.
    pub async fn wait(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            return;
        }
        self.notify.notified().await;
        self.armed.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
