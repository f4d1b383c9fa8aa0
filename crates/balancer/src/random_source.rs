// SPDX-License-Identifier: MIT

//! Injectable randomness for the `Random` and `Weight` policies.
//!
//! The spec's REDESIGN FLAGS call out process-wide RNG sharing as a risk:
//! a hidden global source can't be made deterministic for tests. Threading
//! a `RandomSource` through the policy constructor instead keeps `Random`
//! and `Weight` pure functions of (input slice, RNG state), same as
//! `RoundRobin`'s counter.

use rand::Rng;
use std::sync::Mutex;

/// Produces uniform floats in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic source for tests: replays a fixed sequence of values,
/// repeating the last one once exhausted.
#[derive(Debug)]
pub struct FixedRandomSource {
    values: Mutex<FixedState>,
}

struct FixedState {
    remaining: Vec<f64>,
    last: f64,
}

impl FixedRandomSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        values.reverse();
        let last = values.first().copied().unwrap_or(0.0);
        Self {
            values: Mutex::new(FixedState {
                remaining: values,
                last,
            }),
        }
    }

    /// Convenience for a source that always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedRandomSource {
    fn next_unit(&self) -> f64 {
        let mut state = self.values.lock().unwrap_or_else(|e| e.into_inner());
        match state.remaining.pop() {
            Some(v) => {
                state.last = v;
                v
            }
            None => state.last,
        }
    }
}

#[cfg(test)]
#[path = "random_source_tests.rs"]
mod tests;
