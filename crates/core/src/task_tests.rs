// SPDX-License-Identifier: MIT

use super::*;
use crate::clock::FakeClock;

fn task() -> TaskInfo {
    TaskInfo::new(TaskConfig {
        id: "t1".into(),
        nonce: "n1".into(),
        property: HashMap::new(),
    })
}

#[test]
fn new_task_starts_not_start() {
    let t = task();
    assert_eq!(t.status, TaskStatus::NotStart);
    assert!(!t.is_terminal());
    assert!(t.start_time.is_none());
}

#[yare::parameterized(
    not_start_to_submitted = { TaskStatus::NotStart, TaskStatus::Submitted, true },
    not_start_to_failure   = { TaskStatus::NotStart, TaskStatus::Failure, true },
    not_start_to_progress  = { TaskStatus::NotStart, TaskStatus::InProgress, false },
    not_start_to_success   = { TaskStatus::NotStart, TaskStatus::Success, false },
    submitted_to_progress  = { TaskStatus::Submitted, TaskStatus::InProgress, true },
    submitted_to_success   = { TaskStatus::Submitted, TaskStatus::Success, true },
    submitted_to_failure   = { TaskStatus::Submitted, TaskStatus::Failure, true },
    submitted_to_cancel    = { TaskStatus::Submitted, TaskStatus::Cancel, true },
    progress_to_success    = { TaskStatus::InProgress, TaskStatus::Success, true },
    progress_to_failure    = { TaskStatus::InProgress, TaskStatus::Failure, true },
    progress_to_cancel     = { TaskStatus::InProgress, TaskStatus::Cancel, true },
    progress_to_submitted  = { TaskStatus::InProgress, TaskStatus::Submitted, false },
)]
fn transition_legality(from: TaskStatus, to: TaskStatus, expect_ok: bool) {
    let clock = FakeClock::new(0);
    let mut t = task();
    t.status = from;
    let result = t.set_status(to, &clock);
    assert_eq!(result.is_ok(), expect_ok);
    if expect_ok {
        assert_eq!(t.status, to);
    } else {
        assert_eq!(t.status, from, "rejected transition must leave status unchanged");
    }
}

#[yare::parameterized(
    success = { TaskStatus::Success },
    failure = { TaskStatus::Failure },
    cancel = { TaskStatus::Cancel },
)]
fn terminal_statuses_reject_every_further_transition(terminal: TaskStatus) {
    let clock = FakeClock::new(0);
    let mut t = task();
    t.status = terminal;
    for next in [
        TaskStatus::NotStart,
        TaskStatus::Submitted,
        TaskStatus::InProgress,
        TaskStatus::Success,
        TaskStatus::Failure,
        TaskStatus::Cancel,
    ] {
        let err = t.set_status(next, &clock).unwrap_err();
        assert!(matches!(err, TaskError::AlreadyTerminal { .. }));
    }
}

#[test]
fn start_time_set_on_transition_to_submitted() {
    let clock = FakeClock::new(1_000);
    let mut t = task();
    t.set_status(TaskStatus::Submitted, &clock).unwrap();
    assert_eq!(t.start_time, Some(1_000));
    assert!(t.finish_time.is_none());
}

#[test]
fn finish_time_set_on_any_terminal_transition() {
    let clock = FakeClock::new(2_000);
    let mut t = task();
    t.set_status(TaskStatus::Submitted, &clock).unwrap();
    clock.advance(500);
    t.set_status(TaskStatus::Success, &clock).unwrap();
    assert_eq!(t.finish_time, Some(2_500));
}

#[test]
fn fail_sets_status_reason_and_finish_time() {
    let clock = FakeClock::new(0);
    let mut t = task();
    t.fail("banned word", &clock).unwrap();
    assert_eq!(t.status, TaskStatus::Failure);
    assert_eq!(t.fail_reason.as_deref(), Some("banned word"));
    assert_eq!(t.finish_time, Some(0));
}

#[test]
fn fail_on_already_terminal_task_is_rejected_without_overwriting_reason() {
    let clock = FakeClock::new(0);
    let mut t = task();
    t.fail("first reason", &clock).unwrap();
    let err = t.fail("second reason", &clock).unwrap_err();
    assert!(matches!(err, TaskError::AlreadyTerminal { .. }));
    assert_eq!(t.fail_reason.as_deref(), Some("first reason"));
}

#[test]
fn set_progress_allowed_while_non_terminal() {
    let clock = FakeClock::new(0);
    let mut t = task();
    t.set_status(TaskStatus::Submitted, &clock).unwrap();
    t.set_progress("37%", &clock).unwrap();
    assert_eq!(t.progress, "37%");
}

#[test]
fn set_progress_rejected_once_terminal() {
    let clock = FakeClock::new(0);
    let mut t = task();
    t.set_status(TaskStatus::Submitted, &clock).unwrap();
    t.set_status(TaskStatus::Success, &clock).unwrap();
    let err = t.set_progress("100%", &clock).unwrap_err();
    assert!(matches!(err, TaskError::AlreadyTerminal { .. }));
}

#[test]
fn message_is_success_only_for_success_code() {
    let ok = Message {
        code: UPSTREAM_SUCCESS,
        description: "ok".into(),
    };
    let rejected = Message {
        code: 9,
        description: "banned word".into(),
    };
    assert!(ok.is_success());
    assert!(!rejected.is_success());
}
