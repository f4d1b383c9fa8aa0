// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the dispatcher's external collaborators: the upstream
//! chat-platform client, the task store, and the notifier (spec.md §6).

pub mod notify;
pub mod store;
pub mod upstream;

pub use notify::{NoOpNotifyAdapter, NotifyError, Notifier};
pub use store::{InMemoryTaskStore, StoreError, TaskStore};
pub use upstream::{ActionTarget, BlendDimensions, NoOpUpstreamClient, UpstreamClient, UpstreamError};

#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeTaskStore, StoreCall};
#[cfg(any(test, feature = "test-support"))]
pub use upstream::FakeUpstreamClient;
