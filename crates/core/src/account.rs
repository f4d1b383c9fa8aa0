// SPDX-License-Identifier: MIT

//! Account configuration: a credential-bearing record identifying one
//! upstream bot connection. Read-mostly after init.

use crate::id::AccountId;
use serde::{Deserialize, Serialize};

/// The hard ceiling on effective concurrency for any single account,
/// regardless of configured `core_size`.
pub const MAX_EFFECTIVE_CORE_SIZE: u32 = 12;

/// Credential-bearing record identifying one upstream bot connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable channel identifier, also the instance id.
    pub id: AccountId,
    /// False ⇒ instance is not a selection candidate.
    pub enabled: bool,
    /// Target concurrent executions; effective concurrency is
    /// `min(core_size, 12)`.
    pub core_size: u32,
    /// Used only by the weighted load-balancer policy.
    pub weight: f64,
    /// Opaque credentials consumed by the upstream client.
    #[serde(default)]
    pub credentials: serde_json::Value,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, core_size: u32) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            core_size: core_size.max(1),
            weight: 1.0,
            credentials: serde_json::Value::Null,
        }
    }

    /// `min(max(core_size, 1), 12)` — the semaphore count (invariant I4).
    pub fn effective_core_size(&self) -> u32 {
        self.core_size.clamp(1, MAX_EFFECTIVE_CORE_SIZE)
    }

    /// True when the configured `core_size` was clamped down to
    /// [`MAX_EFFECTIVE_CORE_SIZE`]. Used only to decide whether to emit a
    /// one-time warning at instance construction; never part of the
    /// programmatic contract (see SPEC_FULL.md §9).
    pub fn core_size_was_clamped(&self) -> bool {
        self.core_size > MAX_EFFECTIVE_CORE_SIZE
    }
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
