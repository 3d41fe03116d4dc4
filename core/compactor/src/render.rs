//! Flatten entries being dropped into plain text for a summarization call.

use cocode_context::convert_to_llm;
use cocode_protocol::ContentBlock;
use cocode_protocol::SessionEntry;

pub fn render_for_summary(entries: &[SessionEntry]) -> String {
    convert_to_llm(entries)
        .iter()
        .map(|msg| {
            let role = match msg.role {
                cocode_context::LlmRole::User => "user",
                cocode_context::LlmRole::Assistant => "assistant",
                cocode_context::LlmRole::Tool => "tool",
            };
            let text: String = msg
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } | ContentBlock::Thinking { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("{role}: {text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use cocode_protocol::EntryPayload;
    use cocode_protocol::UserMessage;

    use super::*;

    #[test]
    fn renders_one_line_per_message() {
        let entries = vec![
            SessionEntry::new(EntryPayload::User(UserMessage::text("hi"))),
            SessionEntry::new(EntryPayload::User(UserMessage::text("there"))),
        ];
        let rendered = render_for_summary(&entries);
        assert_eq!(rendered, "user: hi\nuser: there");
    }
}
