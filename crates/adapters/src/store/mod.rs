// SPDX-License-Identifier: MIT

//! Task store interface (consumed collaborator, spec.md §6).

mod memory;

pub use memory::InMemoryTaskStore;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTaskStore, StoreCall};

use async_trait::async_trait;
use botpool_core::{TaskId, TaskInfo};
use thiserror::Error;

/// Errors from task-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save failed for task {0}: {1}")]
    SaveFailed(TaskId, String),
}

/// Persists task state. `save` upserts by id; `delete` removes a record —
/// used by the submission facade to compensate when enqueue itself throws
/// (spec.md §7, "Partial state").
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    async fn save(&self, task: &TaskInfo) -> Result<(), StoreError>;

    async fn delete(&self, id: &TaskId);
}
