// SPDX-License-Identifier: MIT

//! `Random`: uniform pick over the candidate list.

use crate::policy::LoadBalancer;
use crate::random_source::{RandomSource, ThreadRandomSource};
use crate::snapshot::InstanceSnapshot;

/// Uniform pick using an injected [`RandomSource`] (defaults to the thread
/// RNG; tests inject a [`crate::random_source::FixedRandomSource`]).
pub struct Random<R: RandomSource = ThreadRandomSource> {
    source: R,
}

impl Random<ThreadRandomSource> {
    pub fn new() -> Self {
        Self {
            source: ThreadRandomSource,
        }
    }
}

impl Default for Random<ThreadRandomSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Random<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> LoadBalancer for Random<R> {
    fn choose<'a>(&self, instances: &'a [InstanceSnapshot]) -> Option<&'a InstanceSnapshot> {
        if instances.is_empty() {
            return None;
        }
        let idx = (self.source.next_unit() * instances.len() as f64) as usize;
        instances.get(idx.min(instances.len() - 1))
    }
}

#[cfg(test)]
#[path = "random_tests.rs"]
mod tests;
