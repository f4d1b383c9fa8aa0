// SPDX-License-Identifier: MIT

use super::*;

fn snap(id: &str, core_size: u32, running: u32, queue: u32) -> InstanceSnapshot {
    let mut s = InstanceSnapshot::new(id, core_size);
    s.running_count = running;
    s.queue_len = queue;
    s
}

#[test]
fn empty_input_returns_none() {
    assert_eq!(BestWaitIdle.choose(&[]), None);
}

#[test]
fn picks_instance_with_most_free_slots() {
    // Scenario 4, first half: A(4,4,0) free=0, B(2,1,0) free=1 -> B.
    let instances = vec![snap("A", 4, 4, 0), snap("B", 2, 1, 0)];
    let chosen = BestWaitIdle.choose(&instances).unwrap();
    assert_eq!(chosen.account_id, "B");
}

#[test]
fn falls_back_to_load_ratio_when_nobody_is_free() {
    // Scenario 4, second half: A(4,4,0) load=1.0, B(2,2,10) load=6.0 -> A.
    let instances = vec![snap("A", 4, 4, 0), snap("B", 2, 2, 10)];
    let chosen = BestWaitIdle.choose(&instances).unwrap();
    assert_eq!(chosen.account_id, "A");
}

#[test]
fn ties_in_free_slots_break_by_list_order() {
    let instances = vec![snap("A", 4, 2, 0), snap("B", 4, 2, 0)];
    let chosen = BestWaitIdle.choose(&instances).unwrap();
    assert_eq!(chosen.account_id, "A");
}

#[test]
fn ties_in_load_ratio_break_by_list_order() {
    let instances = vec![snap("A", 2, 2, 0), snap("B", 2, 2, 0)];
    let chosen = BestWaitIdle.choose(&instances).unwrap();
    assert_eq!(chosen.account_id, "A");
}

#[test]
fn single_instance_is_always_chosen() {
    let instances = vec![snap("only", 4, 0, 0)];
    assert_eq!(BestWaitIdle.choose(&instances).unwrap().account_id, "only");
}
