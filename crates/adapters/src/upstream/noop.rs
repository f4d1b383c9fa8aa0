// SPDX-License-Identifier: MIT

//! Upstream client that accepts every request immediately. Useful for local
//! experimentation and as a sensible default before a real platform client
//! is wired in.

use super::{ActionTarget, BlendDimensions, UpstreamClient, UpstreamError};
use async_trait::async_trait;
use botpool_core::Message;
use botpool_core::task::UPSTREAM_SUCCESS;

fn accepted() -> Message {
    Message {
        code: UPSTREAM_SUCCESS,
        description: "accepted".to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpUpstreamClient;

#[async_trait]
impl UpstreamClient for NoOpUpstreamClient {
    async fn imagine(&self, _prompt: &str, _nonce: &str) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn upscale(&self, _target: ActionTarget) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn variation(&self, _target: ActionTarget) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn reroll(&self, _target: ActionTarget) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn action(
        &self,
        _message_id: &str,
        _custom_id: &str,
        _flags: u32,
        _nonce: &str,
    ) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn describe(&self, _final_file_name: &str, _nonce: &str) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn blend(
        &self,
        _final_file_names: Vec<String>,
        _dimensions: BlendDimensions,
        _nonce: &str,
    ) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn upload(&self, _file_name: &str, _data_url: &str) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }

    async fn send_image_message(
        &self,
        _content: &str,
        _final_file_name: &str,
    ) -> Result<Message, UpstreamError> {
        Ok(accepted())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
