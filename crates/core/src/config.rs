// SPDX-License-Identifier: MIT

//! Internal dispatcher tunables.
//!
//! This is deliberately narrow: it covers only the constants the runtime
//! itself needs (poll cadence, watchdog), not general application
//! configuration. Loading a config *file* from disk, merging layers, and
//! acquiring a daemon lock remain the host application's responsibility —
//! those concerns are out of scope for this crate (see spec.md §1).

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_poll_interval() -> Duration {
    Duration::from_millis(1_000)
}

fn default_acquire_poll() -> Duration {
    Duration::from_millis(100)
}

/// Tunables for the instance runtime and dispatcher, with defaults matching
/// the literal constants in spec.md §4.3.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Interval the executor sleeps for between `persist+notify` polls while
    /// a task is `SUBMITTED`/`IN_PROGRESS`. Also the length of the first
    /// grace period after a successful enqueue.
    #[serde(with = "duration_millis")]
    pub poll_interval: Duration,
    /// How long the dispatcher blocks on `TryAcquire` before re-checking
    /// for shutdown/new work.
    #[serde(with = "duration_millis")]
    pub acquire_poll_interval: Duration,
    /// Maximum time a task may remain non-terminal before the runtime
    /// forcibly fails it with `FAILURE("timeout")`. `None` (the default)
    /// means no watchdog, matching the literal spec behavior.
    #[serde(with = "option_duration_millis")]
    pub watchdog: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            acquire_poll_interval: default_acquire_poll(),
            watchdog: None,
        }
    }
}

impl RuntimeConfig {
    /// Parse a `RuntimeConfig` from a TOML fragment, falling back to
    /// [`Default`] for any field the host doesn't specify.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (d.as_millis() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

mod option_duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        d.map(|d| d.as_millis() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let ms: Option<u64> = Option::deserialize(d)?;
        Ok(ms.map(Duration::from_millis))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
