use cocode_protocol::EntryPayload;
use cocode_protocol::UserMessage;

use super::*;

#[test]
fn parses_valid_lines() {
    let entry = SessionEntry::new(EntryPayload::User(UserMessage::text("hi")));
    let line = serde_json::to_string(&entry).unwrap();
    let parsed = parse_tolerant(&line);
    assert_eq!(parsed, vec![entry]);
}

#[test]
fn skips_unknown_type_tag() {
    let contents = r#"{"id":"00000000-0000-0000-0000-000000000000","parentId":null,"timestamp":"2026-01-01T00:00:00Z","type":"future_type","data":{}}"#;
    assert!(parse_tolerant(contents).is_empty());
}

#[test]
fn skips_corrupt_json_without_panicking() {
    let contents = "not json at all {{{";
    assert!(parse_tolerant(contents).is_empty());
}

#[test]
fn skips_blank_lines_between_entries() {
    let entry = SessionEntry::new(EntryPayload::User(UserMessage::text("hi")));
    let contents = format!("\n{}\n\n", serde_json::to_string(&entry).unwrap());
    assert_eq!(parse_tolerant(&contents), vec![entry]);
}
