// SPDX-License-Identifier: MIT

//! The `Choose(instances) -> instance | none` interface (component C4).

use crate::snapshot::InstanceSnapshot;

/// A pluggable selection policy over live instance metrics.
pub trait LoadBalancer: Send + Sync {
    /// Choose one candidate from `instances`. Returns `None` for empty
    /// input (B1), for every policy.
    fn choose<'a>(&self, instances: &'a [InstanceSnapshot]) -> Option<&'a InstanceSnapshot>;
}
