use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use cocode_error::ErrorExt;
use cocode_protocol::EntryPayload;
use cocode_protocol::UserMessage;

use super::*;

struct StubSummarizer {
    calls: AtomicUsize,
}

impl StubSummarizer {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, prompt: &str, _max_tokens: i64) -> Result<String, CompactError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("summary#{n}[{prompt}]"))
    }
}

fn user(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::User(UserMessage::text(text)))
}

fn assistant(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::Assistant(cocode_protocol::AssistantMessage {
        content: vec![cocode_protocol::ContentBlock::Text { text: text.to_string() }],
        usage: cocode_protocol::TokenUsage::zero(),
        stop_reason: cocode_protocol::StopReason::Stop,
        error_message: None,
    }))
}

fn tool_result(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::ToolResult(cocode_protocol::ToolResultMessage {
        tool_call_id: "call-1".to_string(),
        content: cocode_protocol::ToolResultContent::Text(text.to_string()),
        is_error: false,
        details: None,
    }))
}

#[tokio::test]
async fn empty_window_is_an_error() {
    let summarizer = StubSummarizer::new();
    let err = split_turn_summarize(&summarizer, &[], 100).await.unwrap_err();
    assert_eq!(err.status_code(), cocode_error::StatusCode::InvalidArguments);
}

#[tokio::test]
async fn single_entry_makes_one_call() {
    let summarizer = StubSummarizer::new();
    let dropped = vec![user("hello")];
    let summary = split_turn_summarize(&summarizer, &dropped, 100).await.unwrap();
    assert_eq!(summary, "summary#0[user: hello]");
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn multi_entry_splits_and_joins_with_divider() {
    let summarizer = StubSummarizer::new();
    let dropped = vec![user("a"), user("b"), user("c"), user("d")];
    let summary = split_turn_summarize(&summarizer, &dropped, 100).await.unwrap();
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 2);
    assert_eq!(summary, "summary#0[user: a\nuser: b]\n\n---\n\nsummary#1[user: c\nuser: d]");
}

#[tokio::test]
async fn odd_length_splits_shorter_half_first() {
    let summarizer = StubSummarizer::new();
    let dropped = vec![user("a"), user("b"), user("c")];
    let summary = split_turn_summarize(&summarizer, &dropped, 100).await.unwrap();
    assert_eq!(summary, "summary#0[user: a]\n\n---\n\nsummary#1[user: b\nuser: c]");
}

#[tokio::test]
async fn a_midpoint_landing_inside_a_turn_is_pulled_back_to_that_turns_start() {
    let summarizer = StubSummarizer::new();
    // The raw midpoint (index 2) falls between "b"'s user turn and its own
    // assistant reply. Splitting there would tear that turn in half; the
    // split must move back to index 1, the start of the turn it landed in.
    let dropped = vec![user("a"), user("b"), assistant("reply-b"), tool_result("ok"), assistant("reply-b-2")];
    let summary = split_turn_summarize(&summarizer, &dropped, 100).await.unwrap();
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 2);
    assert!(summary.starts_with("summary#0[user: a]"));
    assert!(summary.contains("summary#1["));
    assert!(summary.ends_with("reply-b-2]"));
}
