// SPDX-License-Identifier: MIT

//! `Weight`: sample proportionally to each instance's configured weight.

use crate::policy::LoadBalancer;
use crate::random_source::{RandomSource, ThreadRandomSource};
use crate::snapshot::InstanceSnapshot;

/// Let `W = sum(weight(i))`. Sample `r in [0, W)` uniformly; return the
/// first `i` for which the cumulative prefix sum of weights exceeds `r`.
/// Falls back to the last instance if floating-point rounding leaves no
/// match. Instances with weight 0 are unreachable.
pub struct Weight<R: RandomSource = ThreadRandomSource> {
    source: R,
}

impl Weight<ThreadRandomSource> {
    pub fn new() -> Self {
        Self {
            source: ThreadRandomSource,
        }
    }
}

impl Default for Weight<ThreadRandomSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Weight<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> LoadBalancer for Weight<R> {
    fn choose<'a>(&self, instances: &'a [InstanceSnapshot]) -> Option<&'a InstanceSnapshot> {
        if instances.is_empty() {
            return None;
        }

        let total: f64 = instances.iter().map(|i| i.weight).sum();
        if total <= 0.0 {
            return instances.last();
        }

        let r = self.source.next_unit() * total;
        let mut cumulative = 0.0;
        for instance in instances {
            cumulative += instance.weight;
            if cumulative > r {
                return Some(instance);
            }
        }
        instances.last()
    }
}

#[cfg(test)]
#[path = "weight_tests.rs"]
mod tests;
