// SPDX-License-Identifier: MIT

//! In-memory task store: a reference implementation suitable for local
//! experimentation and for the workspace's own integration tests. A
//! production host wires in its own durable store behind the same trait
//! (spec.md §1, persistence backend is out of scope for this crate).

use super::{StoreError, TaskStore};
use async_trait::async_trait;
use botpool_core::{TaskId, TaskInfo};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    inner: Arc<Mutex<HashMap<TaskId, TaskInfo>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &TaskId) -> Option<TaskInfo> {
        self.inner.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn save(&self, task: &TaskInfo) -> Result<(), StoreError> {
        self.inner.lock().insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: &TaskId) {
        self.inner.lock().remove(id);
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
