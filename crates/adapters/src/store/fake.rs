// SPDX-License-Identifier: MIT

//! Fake task store for testing: records every `save`/`delete` call in order
//! in addition to behaving like [`super::InMemoryTaskStore`].
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{StoreError, TaskStore};
use async_trait::async_trait;
use botpool_core::{TaskId, TaskInfo};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A recorded call against [`FakeTaskStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Save(TaskId),
    Delete(TaskId),
}

struct FakeState {
    records: HashMap<TaskId, TaskInfo>,
    calls: Vec<StoreCall>,
    fail_saves: bool,
}

#[derive(Clone)]
pub struct FakeTaskStore {
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeTaskStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                records: HashMap::new(),
                calls: Vec::new(),
                fail_saves: false,
            })),
        }
    }
}

impl FakeTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the fake to fail every subsequent `save` call, for testing
    /// the admission-error path (spec.md §7, "Collaborator errors").
    pub fn fail_saves(&self) {
        self.inner.lock().fail_saves = true;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    pub fn get(&self, id: &TaskId) -> Option<TaskInfo> {
        self.inner.lock().records.get(id).cloned()
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.inner.lock().records.contains_key(id)
    }
}

#[async_trait]
impl TaskStore for FakeTaskStore {
    async fn save(&self, task: &TaskInfo) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        if state.fail_saves {
            return Err(StoreError::SaveFailed(
                task.id.clone(),
                "fake store configured to fail".to_string(),
            ));
        }
        state.calls.push(StoreCall::Save(task.id.clone()));
        state.records.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: &TaskId) {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::Delete(id.clone()));
        state.records.remove(id);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
