use cocode_protocol::ToolResultContent;
use cocode_protocol::ToolResultMessage;

use super::*;

fn tool_result(text: &str) -> SessionEntry {
    SessionEntry::new(EntryPayload::ToolResult(ToolResultMessage {
        tool_call_id: "c".into(),
        content: ToolResultContent::Text(text.into()),
        is_error: false,
        details: None,
    }))
}

#[test]
fn keeps_the_most_recent_n_tool_results_intact() {
    let entries = vec![tool_result("old"), tool_result("mid"), tool_result("new")];
    let compacted = micro_compact_view(&entries, 1);

    let EntryPayload::ToolResult(first) = &compacted[0].payload else { panic!() };
    assert_eq!(first.content, ToolResultContent::Text(PLACEHOLDER.to_string()));
    let EntryPayload::ToolResult(last) = &compacted[2].payload else { panic!() };
    assert_eq!(last.content, ToolResultContent::Text("new".to_string()));
}

#[test]
fn keep_recent_greater_than_total_truncates_nothing() {
    let entries = vec![tool_result("a"), tool_result("b")];
    let compacted = micro_compact_view(&entries, 10);
    assert_eq!(compacted, entries);
}

#[test]
fn non_tool_result_entries_are_untouched() {
    let entries = vec![SessionEntry::new(EntryPayload::User(cocode_protocol::UserMessage::text("hi")))];
    let compacted = micro_compact_view(&entries, 0);
    assert_eq!(compacted, entries);
}
