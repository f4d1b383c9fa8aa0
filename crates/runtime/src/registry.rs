// SPDX-License-Identifier: MIT

//! Instance registry (component C5): holds every account's runtime, keyed by
//! account id. Registration/removal are rare admin operations, so a single
//! coarse lock is sufficient (spec.md §4.5).

use crate::instance::Instance;
use botpool_adapters::{Notifier, TaskStore, UpstreamClient};
use botpool_core::{AccountId, Clock};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

pub struct InstanceRegistry<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    instances: Mutex<HashMap<AccountId, Arc<Instance<U, S, N, C>>>>,
}

impl<U, S, N, C> Default for InstanceRegistry<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    fn default() -> Self {
        Self {
            instances: Mutex::new(HashMap::new()),
        }
    }
}

impl<U, S, N, C> InstanceRegistry<U, S, N, C>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, instance: Arc<Instance<U, S, N, C>>) {
        self.instances.lock().insert(instance.account().id.clone(), instance);
    }

    pub fn remove(&self, account_id: &AccountId) -> Option<Arc<Instance<U, S, N, C>>> {
        self.instances.lock().remove(account_id)
    }

    pub fn get(&self, account_id: &AccountId) -> Option<Arc<Instance<U, S, N, C>>> {
        self.instances.lock().get(account_id).cloned()
    }

    /// `Alive()`: the subset of registered instances whose account is
    /// currently enabled.
    pub fn alive(&self) -> Vec<Arc<Instance<U, S, N, C>>> {
        self.instances
            .lock()
            .values()
            .filter(|instance| instance.account().enabled)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instances.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
