// SPDX-License-Identifier: MIT

//! Fake upstream client for testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ActionTarget, BlendDimensions, UpstreamClient, UpstreamError};
use async_trait::async_trait;
use botpool_core::task::UPSTREAM_SUCCESS;
use botpool_core::Message;
use parking_lot::Mutex;
use std::sync::Arc;

/// A recorded call against [`FakeUpstreamClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamCall {
    Imagine { prompt: String, nonce: String },
    Upscale(String),
    Variation(String),
    Reroll(String),
    Action { message_id: String, custom_id: String },
    Describe(String),
    Blend(Vec<String>),
    Upload(String),
    SendImageMessage(String),
}

struct FakeState {
    calls: Vec<UpstreamCall>,
    response: Message,
}

/// Fake upstream client: always returns the same configured [`Message`] and
/// records every call for assertions, mirroring `oj_adapters::FakeAgentAdapter`.
#[derive(Clone)]
pub struct FakeUpstreamClient {
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeUpstreamClient {
    fn default() -> Self {
        Self::accepting()
    }
}

impl FakeUpstreamClient {
    /// A fake that accepts every request.
    pub fn accepting() -> Self {
        Self::with_response(Message {
            code: UPSTREAM_SUCCESS,
            description: "accepted".to_string(),
        })
    }

    /// A fake that rejects every request with the given code/description.
    pub fn rejecting(code: i32, description: impl Into<String>) -> Self {
        Self::with_response(Message {
            code,
            description: description.into(),
        })
    }

    fn with_response(response: Message) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                response,
            })),
        }
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.inner.lock().calls.clone()
    }

    fn record(&self, call: UpstreamCall) -> Message {
        let mut state = self.inner.lock();
        state.calls.push(call);
        state.response.clone()
    }
}

#[async_trait]
impl UpstreamClient for FakeUpstreamClient {
    async fn imagine(&self, prompt: &str, nonce: &str) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Imagine {
            prompt: prompt.to_string(),
            nonce: nonce.to_string(),
        }))
    }

    async fn upscale(&self, target: ActionTarget) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Upscale(target.message_id)))
    }

    async fn variation(&self, target: ActionTarget) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Variation(target.message_id)))
    }

    async fn reroll(&self, target: ActionTarget) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Reroll(target.message_id)))
    }

    async fn action(
        &self,
        message_id: &str,
        custom_id: &str,
        _flags: u32,
        _nonce: &str,
    ) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Action {
            message_id: message_id.to_string(),
            custom_id: custom_id.to_string(),
        }))
    }

    async fn describe(&self, final_file_name: &str, _nonce: &str) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Describe(final_file_name.to_string())))
    }

    async fn blend(
        &self,
        final_file_names: Vec<String>,
        _dimensions: BlendDimensions,
        _nonce: &str,
    ) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Blend(final_file_names)))
    }

    async fn upload(&self, file_name: &str, _data_url: &str) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::Upload(file_name.to_string())))
    }

    async fn send_image_message(
        &self,
        content: &str,
        _final_file_name: &str,
    ) -> Result<Message, UpstreamError> {
        Ok(self.record(UpstreamCall::SendImageMessage(content.to_string())))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
