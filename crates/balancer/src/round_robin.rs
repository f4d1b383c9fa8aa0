// SPDX-License-Identifier: MIT

//! `RoundRobin`: cycles through candidates in list order.

use crate::policy::LoadBalancer;
use crate::snapshot::InstanceSnapshot;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Maintains a monotonic position counter, incremented atomically on every
/// call. The counter is per-balancer-instance and need not survive process
/// restarts.
#[derive(Debug, Default)]
pub struct RoundRobin {
    position: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self {
            position: AtomicUsize::new(0),
        }
    }
}

impl LoadBalancer for RoundRobin {
    fn choose<'a>(&self, instances: &'a [InstanceSnapshot]) -> Option<&'a InstanceSnapshot> {
        if instances.is_empty() {
            return None;
        }
        let pos = self.position.fetch_add(1, Ordering::Relaxed);
        instances.get(pos % instances.len())
    }
}

#[cfg(test)]
#[path = "round_robin_tests.rs"]
mod tests;
