use cocode_protocol::AssistantMessage;
use cocode_protocol::ContentBlock;
use cocode_protocol::EntryPayload;
use cocode_protocol::StopReason;
use cocode_protocol::TokenUsage;
use cocode_protocol::UserMessage;

use super::*;

struct EchoSummarizer;

#[async_trait::async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, prompt: &str, _max_tokens: i64) -> Result<String, crate::error::CompactError> {
        Ok(format!("summary of: {prompt}"))
    }
}

struct FailingSummarizer;

#[async_trait::async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _prompt: &str, _max_tokens: i64) -> Result<String, crate::error::CompactError> {
        crate::error::compact_error::SummarizeSnafu { message: "provider down".to_string() }.fail()
    }
}

fn big_user(label: &str) -> SessionEntry {
    let text = format!("{label}{}", "x".repeat(4_000));
    SessionEntry::new(EntryPayload::User(UserMessage::text(&text)))
}

fn assistant_reply(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::Assistant(AssistantMessage {
        content: vec![ContentBlock::Text { text: text.into() }],
        usage: TokenUsage::new(10, 10),
        stop_reason: StopReason::Stop,
        error_message: None,
    }))
}

#[tokio::test]
async fn hook_cancel_short_circuits() {
    let summarizer = EchoSummarizer;
    let outcome = compact_branch(&summarizer, &[], 0, 1_200, 100, 5_000, HookDecision::Cancelled).await;
    assert!(matches!(outcome, Outcome::Cancelled));
}

#[tokio::test]
async fn hook_override_skips_the_summarizer() {
    let summarizer = EchoSummarizer;
    let override_entry = CompactionEntry {
        summary: "custom".into(),
        first_kept_entry_id: uuid::Uuid::new_v4(),
        tokens_before: 1,
        details: None,
    };
    let outcome = compact_branch(
        &summarizer,
        &[],
        0,
        1_200,
        100,
        5_000,
        HookDecision::Override(override_entry.clone()),
    )
    .await;
    match outcome {
        Outcome::Entry(entry) => assert_eq!(entry.summary, "custom"),
        other => panic!("expected Entry, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_compaction_produces_an_entry_pointing_at_the_cut() {
    let branch = vec![big_user("old1"), big_user("old2"), assistant_reply("kept")];
    let summarizer = EchoSummarizer;
    let outcome = compact_branch(&summarizer, &branch, 1, 1_200, 1_000, 9_000, HookDecision::Proceed).await;
    match outcome {
        Outcome::Entry(entry) => {
            assert_eq!(entry.first_kept_entry_id, branch[1].id);
            assert_eq!(entry.tokens_before, 9_000);
            assert!(entry.summary.contains("old1"));
        }
        other => panic!("expected Entry, got {other:?}"),
    }
}

#[tokio::test]
async fn nothing_old_enough_to_cut_fails_softly() {
    let branch = vec![assistant_reply("only entry")];
    let summarizer = EchoSummarizer;
    let outcome = compact_branch(&summarizer, &branch, 1_000_000, 1_200, 1_000, 100, HookDecision::Proceed).await;
    assert!(matches!(outcome, Outcome::Failed(_)));
}

#[tokio::test]
async fn summarizer_failure_does_not_abort_the_turn() {
    let branch = vec![big_user("old1"), big_user("old2"), assistant_reply("kept")];
    let summarizer = FailingSummarizer;
    let outcome = compact_branch(&summarizer, &branch, 1, 1_200, 1_000, 9_000, HookDecision::Proceed).await;
    match outcome {
        Outcome::Failed(message) => assert!(message.contains("provider down")),
        other => panic!("expected Failed, got {other:?}"),
    }
}
