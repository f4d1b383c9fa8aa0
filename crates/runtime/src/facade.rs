// SPDX-License-Identifier: MIT

//! Submission facade (component C6): the single entry point external code
//! uses to submit a task (spec.md §4.6).

use crate::instance::{Instance, SubmitResult, Thunk};
use crate::registry::InstanceRegistry;
use botpool_adapters::{Notifier, TaskStore, UpstreamClient};
use botpool_balancer::{InstanceSnapshot, LoadBalancer};
use botpool_core::{Clock, TaskInfo};
use std::sync::Arc;

/// Given a task and a thunk constructor, resolves live instances, applies
/// the configured load-balancing policy, and forwards to the chosen
/// instance's `Submit`.
pub struct SubmissionFacade<U, S, N, C, B>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
    B: LoadBalancer,
{
    registry: Arc<InstanceRegistry<U, S, N, C>>,
    balancer: B,
}

impl<U, S, N, C, B> SubmissionFacade<U, S, N, C, B>
where
    U: UpstreamClient,
    S: TaskStore,
    N: Notifier,
    C: Clock,
    B: LoadBalancer,
{
    pub fn new(registry: Arc<InstanceRegistry<U, S, N, C>>, balancer: B) -> Self {
        Self { registry, balancer }
    }

    /// (1) queries the registry for live instances, (2) fails with
    /// `"no available instance"` if none, (3) invokes the policy's
    /// `Choose`, (4) builds the thunk bound to the chosen instance via
    /// `thunk_builder`, (5) calls `instance.Submit` and returns its result.
    pub async fn submit(
        &self,
        task: TaskInfo,
        thunk_builder: impl FnOnce(&Instance<U, S, N, C>) -> Thunk,
    ) -> SubmitResult {
        let alive = self.registry.alive();
        if alive.is_empty() {
            return SubmitResult::failure("no available instance");
        }

        let snapshots: Vec<InstanceSnapshot> = alive.iter().map(|instance| instance.snapshot()).collect();
        let Some(chosen_snapshot) = self.balancer.choose(&snapshots) else {
            return SubmitResult::failure("no available instance");
        };
        let Some(instance) = alive
            .iter()
            .find(|instance| instance.account().id == chosen_snapshot.account_id)
        else {
            return SubmitResult::failure("no available instance");
        };

        let thunk = thunk_builder(instance.as_ref());
        instance.submit(task, thunk).await
    }
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
