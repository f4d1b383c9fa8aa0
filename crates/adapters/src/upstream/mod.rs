// SPDX-License-Identifier: MIT

//! Upstream chat-platform protocol client interface (consumed collaborator,
//! spec.md §6). All wire framing — HTTP/WebSocket, login, message parsing —
//! belongs to the concrete implementation; this crate only defines the seam
//! and ships a fake for tests.

mod noop;

pub use noop::NoOpUpstreamClient;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeUpstreamClient, UpstreamCall};

use async_trait::async_trait;
use botpool_core::Message;
use thiserror::Error;

/// Errors raised while talking to the upstream platform (transport-level,
/// not the application-level acceptance/rejection carried in [`Message`]).
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    RequestFailed(String),
}

/// The image dimensions requested for a `Blend` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendDimensions {
    Square,
    Portrait,
    Landscape,
}

/// Shared parameters for the three action-on-an-existing-message operations
/// (`Upscale`, `Variation`, `Reroll`), which all target a previously
/// generated image by message id and grid index.
#[derive(Debug, Clone)]
pub struct ActionTarget {
    pub message_id: String,
    pub index: u32,
    pub hash: String,
    pub flags: u32,
    pub nonce: String,
}

/// The upstream chat-platform protocol client.
///
/// Each method returns a [`Message`] whose `code` indicates whether the
/// upstream accepted the job (see [`botpool_core::task::UPSTREAM_SUCCESS`]);
/// any other code is an immediate failure recorded on the task. The client
/// is expected to, on inbound upstream events, update the corresponding
/// `TaskInfo` (progress, `message_id`, terminal status) out of band — the
/// instance runtime only polls those fields (spec.md §4.3 step 5).
#[async_trait]
pub trait UpstreamClient: Send + Sync + 'static {
    async fn imagine(&self, prompt: &str, nonce: &str) -> Result<Message, UpstreamError>;

    async fn upscale(&self, target: ActionTarget) -> Result<Message, UpstreamError>;

    async fn variation(&self, target: ActionTarget) -> Result<Message, UpstreamError>;

    async fn reroll(&self, target: ActionTarget) -> Result<Message, UpstreamError>;

    async fn action(
        &self,
        message_id: &str,
        custom_id: &str,
        flags: u32,
        nonce: &str,
    ) -> Result<Message, UpstreamError>;

    async fn describe(&self, final_file_name: &str, nonce: &str) -> Result<Message, UpstreamError>;

    async fn blend(
        &self,
        final_file_names: Vec<String>,
        dimensions: BlendDimensions,
        nonce: &str,
    ) -> Result<Message, UpstreamError>;

    async fn upload(&self, file_name: &str, data_url: &str) -> Result<Message, UpstreamError>;

    async fn send_image_message(
        &self,
        content: &str,
        final_file_name: &str,
    ) -> Result<Message, UpstreamError>;
}
