//! Uniform provider facade: core code calls `generate`/`stream` and never
//! sees Anthropic/OpenAI/Google wire shapes.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::HyperError;
use crate::request::GenerateRequest;
use crate::response::GenerateResponse;
use crate::stream::StreamEvent;

pub type BoxStream<T> = Pin<Box<dyn Stream<Item = Result<T, HyperError>> + Send>>;

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, HyperError>;

    async fn stream(&self, request: GenerateRequest) -> Result<BoxStream<StreamEvent>, HyperError>;
}

#[cfg(test)]
#[path = "provider.test.rs"]
mod tests;
