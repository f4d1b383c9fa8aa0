// SPDX-License-Identifier: MIT

//! Notification adapters (consumed collaborator, spec.md §6).

mod noop;

pub use noop::NoOpNotifyAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use botpool_core::TaskInfo;
use thiserror::Error;

/// Errors from notify operations.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// `NotifyTaskChange` — best-effort, non-blocking preferred. Failures are
/// logged and swallowed by callers; they must never affect task outcome
/// (spec.md §6, §7).
#[async_trait]
pub trait Notifier: Clone + Send + Sync + 'static {
    async fn notify_task_change(&self, task: &TaskInfo) -> Result<(), NotifyError>;
}
