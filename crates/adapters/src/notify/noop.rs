// SPDX-License-Identifier: MIT

//! Notifier that drops every notification. Sensible default before a real
//! webhook/push transport is wired in.

use super::{NotifyError, Notifier};
use async_trait::async_trait;
use botpool_core::TaskInfo;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifyAdapter;

#[async_trait]
impl Notifier for NoOpNotifyAdapter {
    async fn notify_task_change(&self, _task: &TaskInfo) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
