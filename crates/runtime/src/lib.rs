// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! botpool-runtime: the instance runtime (C2 bounded semaphore, C3 per-account
//! dispatcher/executor), the instance registry (C5), and the submission
//! facade (C6).

mod facade;
mod instance;
mod registry;
mod semaphore;
mod signal;

pub use facade::SubmissionFacade;
pub use instance::{Instance, InstanceHandle, SubmitCode, SubmitResult, Thunk};
pub use registry::InstanceRegistry;
pub use semaphore::BoundedSemaphore;
pub use signal::WorkSignal;
