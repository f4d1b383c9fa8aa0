// SPDX-License-Identifier: MIT

//! `BestWaitIdle`: prefer an instance with a free execution slot; otherwise
//! the least-loaded one.

use crate::policy::LoadBalancer;
use crate::snapshot::InstanceSnapshot;

/// Compute `free(i) = coreSize(i) - |runningFutures(i)|`. If any `free(i) >
/// 0`, return the `i` maximizing `free(i)`, breaking ties by list order.
/// Otherwise return `argmin_i (|runningFutures(i)| + |queue(i)|) /
/// coreSize(i)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestWaitIdle;

impl LoadBalancer for BestWaitIdle {
    fn choose<'a>(&self, instances: &'a [InstanceSnapshot]) -> Option<&'a InstanceSnapshot> {
        if instances.is_empty() {
            return None;
        }

        let best_free = instances
            .iter()
            .enumerate()
            .max_by_key(|(idx, i)| (i.free(), std::cmp::Reverse(*idx)));

        if let Some((_, candidate)) = best_free {
            if candidate.free() > 0 {
                return Some(candidate);
            }
        }

        instances.iter().enumerate().min_by(|(ia, a), (ib, b)| {
            a.load_ratio()
                .partial_cmp(&b.load_ratio())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ia.cmp(ib))
        }).map(|(_, instance)| instance)
    }
}

#[cfg(test)]
#[path = "best_wait_idle_tests.rs"]
mod tests;
