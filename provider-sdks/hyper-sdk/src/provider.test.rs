use futures::stream;

use super::*;

struct EchoProvider;

#[async_trait]
impl Provider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, HyperError> {
        Ok(GenerateResponse::new("resp_1", "echo-model").with_content(vec![cocode_protocol::ContentBlock::Text {
            text: format!("{} messages", request.messages.len()),
        }]))
    }

    async fn stream(&self, _request: GenerateRequest) -> Result<BoxStream<StreamEvent>, HyperError> {
        Ok(Box::pin(stream::iter(vec![Ok(StreamEvent::text_delta(0, "hi"))])))
    }
}

#[tokio::test]
async fn provider_trait_object_is_callable() {
    let provider: Box<dyn Provider> = Box::new(EchoProvider);
    let response = provider.generate(GenerateRequest::default()).await.unwrap();
    assert_eq!(response.text(), "0 messages");
    assert_eq!(provider.name(), "echo");
}
