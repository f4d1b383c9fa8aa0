// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn equality_against_str() {
    let id = AccountId::new("acc-1");
    assert_eq!(id, "acc-1");
    assert_eq!(id, *"acc-1");
}

#[test]
fn display_matches_inner_string() {
    let id = TaskId::new("task-42");
    assert_eq!(id.to_string(), "task-42");
    assert_eq!(id.as_str(), "task-42");
}

#[test]
fn from_string_and_str() {
    assert_eq!(AccountId::from("a"), AccountId::new("a"));
    assert_eq!(AccountId::from(String::from("a")), AccountId::new("a"));
}
