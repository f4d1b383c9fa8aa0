// SPDX-License-Identifier: MIT

//! Pure, balancer-facing view of an instance's live load.
//!
//! Decoupling the balancer from the live `Instance` type (defined in
//! `botpool-runtime`) keeps the policies pure functions of their input slice
//! plus RNG state (P5 in spec.md §8), testable without spinning up a
//! runtime or a tokio executor.

use botpool_core::AccountId;

/// A snapshot of one candidate instance's current load, as read by the
/// load balancer at the moment `Choose` is called.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSnapshot {
    pub account_id: AccountId,
    /// Effective core size (already clamped to [1, 12]).
    pub core_size: u32,
    /// `|runningFutures(i)|` at the time of the snapshot.
    pub running_count: u32,
    /// `|queue(i)|` at the time of the snapshot.
    pub queue_len: u32,
    /// Used only by the weighted policy.
    pub weight: f64,
}

impl InstanceSnapshot {
    pub fn new(account_id: impl Into<AccountId>, core_size: u32) -> Self {
        Self {
            account_id: account_id.into(),
            core_size,
            running_count: 0,
            queue_len: 0,
            weight: 1.0,
        }
    }

    /// `free(i) = coreSize(i) - |runningFutures(i)|`, saturating at 0.
    pub fn free(&self) -> i64 {
        self.core_size as i64 - self.running_count as i64
    }

    /// `(|runningFutures(i)| + |queue(i)|) / coreSize(i)`.
    pub fn load_ratio(&self) -> f64 {
        (self.running_count as f64 + self.queue_len as f64) / self.core_size as f64
    }
}
