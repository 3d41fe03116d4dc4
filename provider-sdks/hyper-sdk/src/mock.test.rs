use futures::StreamExt;

use super::*;

#[tokio::test]
async fn generate_returns_scripted_replies_in_order() {
    let provider = MockProvider::new("mock", vec![MockReply::text("first"), MockReply::text("second")]);
    let first = provider.generate(GenerateRequest::default()).await.unwrap();
    let second = provider.generate(GenerateRequest::default()).await.unwrap();
    assert_eq!(first.text(), "first");
    assert_eq!(second.text(), "second");
}

#[tokio::test]
async fn generate_errors_once_script_is_exhausted() {
    let provider = MockProvider::new("mock", vec![]);
    let err = provider.generate(GenerateRequest::default()).await.unwrap_err();
    assert!(matches!(err, HyperError::Internal(_)));
}

#[tokio::test]
async fn stream_yields_text_boundaries_then_done() {
    let provider = MockProvider::new("mock", vec![MockReply::text("hi")]);
    let events: Vec<_> = provider
        .stream(GenerateRequest::default())
        .await
        .unwrap()
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(matches!(events[0], StreamEvent::TextStart { .. }));
    assert!(matches!(events.last().unwrap(), StreamEvent::Done { .. }));
}

#[tokio::test]
async fn stream_emits_tool_call_boundary_pair() {
    let provider = MockProvider::new("mock", vec![MockReply::tool_call("call_1", "read_file", serde_json::json!({}))]);
    let events: Vec<_> = provider
        .stream(GenerateRequest::default())
        .await
        .unwrap()
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(matches!(events[0], StreamEvent::ToolCallStart { .. }));
    assert!(matches!(events[1], StreamEvent::ToolCallEnd { .. }));
}
