// SPDX-License-Identifier: MIT

use super::*;

#[yare::parameterized(
    zero       = { 0,   1 },
    one        = { 1,   1 },
    eight      = { 8,   8 },
    twelve     = { 12,  12 },
    over_cap   = { 100, 12 },
)]
fn effective_core_size_clamps_to_one_through_twelve(configured: u32, expected: u32) {
    let mut account = Account::new("acc-1", 1);
    account.core_size = configured;
    assert_eq!(account.effective_core_size(), expected);
}

#[test]
fn core_size_was_clamped_only_above_ceiling() {
    let mut account = Account::new("acc-1", 12);
    assert!(!account.core_size_was_clamped());
    account.core_size = 13;
    assert!(account.core_size_was_clamped());
}

#[test]
fn new_defaults_to_enabled_with_unit_weight() {
    let account = Account::new("acc-1", 4);
    assert!(account.enabled);
    assert_eq!(account.weight, 1.0);
}
