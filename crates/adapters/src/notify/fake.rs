// SPDX-License-Identifier: MIT

//! Fake notification adapter for testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyError, Notifier};
use async_trait::async_trait;
use botpool_core::{TaskId, TaskInfo, TaskStatus};
use parking_lot::Mutex;
use std::sync::Arc;

/// A recorded notification.
#[derive(Debug, Clone)]
pub struct NotifyCall {
    pub task_id: TaskId,
    pub status: TaskStatus,
}

struct FakeState {
    calls: Vec<NotifyCall>,
}

/// Fake notification adapter for testing: records every call for assertion
/// (e.g. P3/P4's notification-coverage properties), mirroring
/// `oj_adapters::FakeNotifyAdapter`.
#[derive(Clone)]
pub struct FakeNotifyAdapter {
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeNotifyAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState { calls: Vec::new() })),
        }
    }
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NotifyCall> {
        self.inner.lock().calls.clone()
    }

    /// Statuses seen for a given task, in the order they were notified.
    pub fn statuses_for(&self, task_id: &TaskId) -> Vec<TaskStatus> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| &c.task_id == task_id)
            .map(|c| c.status)
            .collect()
    }
}

#[async_trait]
impl Notifier for FakeNotifyAdapter {
    async fn notify_task_change(&self, task: &TaskInfo) -> Result<(), NotifyError> {
        self.inner.lock().calls.push(NotifyCall {
            task_id: task.id.clone(),
            status: task.status,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
