use cocode_protocol::ContentBlock;
use cocode_protocol::EntryPayload;
use cocode_protocol::ImageSource;
use cocode_protocol::UserMessage;

use super::*;

#[test]
fn empty_text_costs_zero_tokens() {
    assert_eq!(estimate_text_tokens(""), 0);
}

#[test]
fn text_tokens_round_up() {
    assert_eq!(estimate_text_tokens("abcde"), 2); // 5 chars / 4 = 1.25 -> 2
    assert_eq!(estimate_text_tokens("abcd"), 1);
}

#[test]
fn image_block_costs_the_flat_estimate() {
    let entry = SessionEntry::new(EntryPayload::User(UserMessage {
        content: vec![ContentBlock::Image {
            source: ImageSource {
                data: "base64".into(),
                media_type: "image/png".into(),
            },
        }],
    }));
    let budget = estimate_entry_tokens(&entry, 1_200);
    assert_eq!(budget.images, 1_200);
    assert_eq!(budget.conversation_text, 0);
}

#[test]
fn header_and_custom_entries_cost_nothing() {
    let header = SessionEntry::new(EntryPayload::Header(cocode_protocol::SessionHeader {
        session_id: "s".into(),
        cwd: "/".into(),
        provider: "anthropic".into(),
        model_id: "claude".into(),
        thinking_level: None,
        branched_from: None,
    }));
    assert_eq!(estimate_entry_tokens(&header, 1_200).total(), 0);
}

#[test]
fn branch_total_includes_reserve() {
    let entries = vec![SessionEntry::new(EntryPayload::User(UserMessage::text("abcd")))];
    let budget = estimate_branch_tokens(&entries, 1_200, 20_000);
    assert_eq!(budget.conversation_text, 1);
    assert_eq!(budget.reserved, 20_000);
    assert_eq!(budget.total(), 20_001);
}
