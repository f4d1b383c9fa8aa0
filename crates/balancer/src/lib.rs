// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! botpool-balancer: pluggable load-balancing policies over a candidate list
//! of live instance snapshots (component C4).

mod best_wait_idle;
mod policy;
mod random;
mod random_source;
mod round_robin;
mod snapshot;
mod weight;

pub use best_wait_idle::BestWaitIdle;
pub use policy::LoadBalancer;
pub use random::Random;
pub use random_source::{FixedRandomSource, RandomSource, ThreadRandomSource};
pub use round_robin::RoundRobin;
pub use snapshot::InstanceSnapshot;
pub use weight::Weight;
