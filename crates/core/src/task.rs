// SPDX-License-Identifier: MIT

//! Task identifier and state machine (component C1).

use crate::clock::Clock;
use crate::id::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Status of a task. Initial status is [`TaskStatus::NotStart`].
///
/// Legal transitions:
/// ```text
/// NOT_START  -> SUBMITTED | FAILURE
/// SUBMITTED  -> IN_PROGRESS | SUCCESS | FAILURE | CANCEL
/// IN_PROGRESS -> SUCCESS | FAILURE | CANCEL
/// *terminal* (SUCCESS, FAILURE, CANCEL) -> (none)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStart,
    Submitted,
    InProgress,
    Failure,
    Success,
    Cancel,
}

impl TaskStatus {
    /// SUCCESS, FAILURE, CANCEL are terminal; no further transitions allowed.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failure | TaskStatus::Cancel)
    }

    fn can_transition_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        match self {
            NotStart => matches!(next, Submitted | Failure),
            Submitted => matches!(next, InProgress | Success | Failure | Cancel),
            InProgress => matches!(next, Success | Failure | Cancel),
            Success | Failure | Cancel => false,
        }
    }
}

/// Errors raised by illegal state-machine operations.
///
/// Illegal transitions are rejected uniformly (see SPEC_FULL.md §4.1,
/// resolving the spec's open question in favor of rejection rather than a
/// silent log-and-no-op).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("task {id} is already terminal ({status:?})")]
    AlreadyTerminal { id: TaskId, status: TaskStatus },
    #[error("task {id} cannot transition from {from:?} to {to:?}")]
    IllegalTransition {
        id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
}

/// An upstream acceptance/rejection response, per SPEC_FULL.md §6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub code: i32,
    pub description: String,
}

/// The upstream code meaning "accepted".
pub const UPSTREAM_SUCCESS: i32 = 1;

impl Message {
    pub fn is_success(&self) -> bool {
        self.code == UPSTREAM_SUCCESS
    }
}

/// Configuration for creating a new task.
#[derive(Debug, Clone, Default)]
pub struct TaskConfig {
    pub id: String,
    pub nonce: String,
    pub property: HashMap<String, serde_json::Value>,
}

/// A single user job with identity, status, progress, and audit timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    pub id: TaskId,
    /// Correlator echoed by upstream responses; may be empty before submit.
    pub nonce: String,
    /// Assigned by upstream after acceptance.
    pub message_id: Option<String>,
    pub status: TaskStatus,
    /// Human-readable progress, e.g. `"37%"`.
    pub progress: String,
    pub start_time: Option<u64>,
    pub finish_time: Option<u64>,
    pub fail_reason: Option<String>,
    pub property: HashMap<String, serde_json::Value>,
}

impl TaskInfo {
    pub fn new(config: TaskConfig) -> Self {
        Self {
            id: TaskId::new(config.id),
            nonce: config.nonce,
            message_id: None,
            status: TaskStatus::NotStart,
            progress: String::new(),
            start_time: None,
            finish_time: None,
            fail_reason: None,
            property: config.property,
        }
    }

    /// Attempt the transition `self.status -> next`. Rejects and leaves the
    /// task unchanged if `next` is not reachable from the current status.
    pub fn set_status(&mut self, next: TaskStatus, clock: &impl Clock) -> Result<(), TaskError> {
        if self.status.is_terminal() {
            return Err(TaskError::AlreadyTerminal {
                id: self.id.clone(),
                status: self.status,
            });
        }
        if !self.status.can_transition_to(next) {
            return Err(TaskError::IllegalTransition {
                id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }

        if next == TaskStatus::Submitted {
            self.start_time = Some(clock.epoch_ms());
        }
        if next.is_terminal() {
            self.finish_time = Some(clock.epoch_ms());
        }
        self.status = next;
        Ok(())
    }

    /// `Fail(reason)`: sets `status=FAILURE`, `fail_reason=reason`,
    /// `finish_time=now`. A no-op error (not a panic) if already terminal,
    /// matching [`Self::set_status`]'s rejection policy.
    pub fn fail(&mut self, reason: impl Into<String>, clock: &impl Clock) -> Result<(), TaskError> {
        self.set_status(TaskStatus::Failure, clock)?;
        self.fail_reason = Some(reason.into());
        Ok(())
    }

    /// Update the human-readable progress string. Allowed in any non-terminal
    /// status; rejected once terminal.
    pub fn set_progress(
        &mut self,
        progress: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskError> {
        let _ = clock; // reserved for future audit-timestamping of progress updates
        if self.status.is_terminal() {
            return Err(TaskError::AlreadyTerminal {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.progress = progress.into();
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
