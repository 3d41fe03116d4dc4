//! Deterministic provider used by this crate's own tests, and reusable by
//! downstream crates that need a `Provider` without a live network call.

use std::sync::Mutex;

use async_trait::async_trait;
use cocode_protocol::ContentBlock;
use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use futures::stream;

use crate::error::HyperError;
use crate::provider::BoxStream;
use crate::provider::Provider;
use crate::request::GenerateRequest;
use crate::response::GenerateResponse;
use crate::stream::StreamEvent;

/// A single scripted reply. `generate` and `stream` both draw from the same
/// queue, in order, so a test can script a conversation's turns up front.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub text: String,
    pub tool_calls: Vec<cocode_protocol::ToolCall>,
    pub stop_reason: StopReason,
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), tool_calls: vec![], stop_reason: StopReason::Stop }
    }

    pub fn tool_call(id: impl Into<String>, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            text: String::new(),
            tool_calls: vec![cocode_protocol::ToolCall::new(id, name, arguments)],
            stop_reason: StopReason::ToolUse,
        }
    }
}

pub struct MockProvider {
    name: String,
    replies: Mutex<Vec<MockReply>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>, replies: Vec<MockReply>) -> Self {
        Self { name: name.into(), replies: Mutex::new(replies) }
    }

    fn next_reply(&self) -> Result<MockReply, HyperError> {
        let mut replies = self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if replies.is_empty() {
            return Err(HyperError::Internal("mock provider exhausted its scripted replies".to_string()));
        }
        Ok(replies.remove(0))
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, HyperError> {
        let reply = self.next_reply()?;
        let mut content = Vec::new();
        if !reply.text.is_empty() {
            content.push(ContentBlock::Text { text: reply.text });
        }
        content.extend(reply.tool_calls.into_iter().map(ContentBlock::ToolCall));
        Ok(GenerateResponse::new(uuid::Uuid::new_v4().to_string(), self.name.clone())
            .with_content(content)
            .with_stop_reason(reply.stop_reason)
            .with_usage(TokenUsage::new(10, 10)))
    }

    async fn stream(&self, _request: GenerateRequest) -> Result<BoxStream<StreamEvent>, HyperError> {
        let reply = self.next_reply()?;
        let mut events = Vec::new();
        if !reply.text.is_empty() {
            events.push(Ok(StreamEvent::TextStart { index: 0 }));
            events.push(Ok(StreamEvent::text_delta(0, reply.text.clone())));
            events.push(Ok(StreamEvent::TextEnd { index: 0, text: reply.text }));
        }
        for (i, call) in reply.tool_calls.into_iter().enumerate() {
            let index = i as i64 + 1;
            events.push(Ok(StreamEvent::tool_call_start(index, call.id.clone(), call.name.clone())));
            events.push(Ok(StreamEvent::tool_call_end(index, call)));
        }
        events.push(Ok(StreamEvent::done(reply.stop_reason, TokenUsage::new(10, 10))));
        Ok(Box::pin(stream::iter(events)))
    }
}

#[cfg(test)]
#[path = "mock.test.rs"]
mod tests;
