use super::*;

#[test]
fn constructors_build_expected_variants() {
    let delta = StreamEvent::text_delta(0, "Hello");
    assert!(delta.is_delta());
    assert_eq!(delta.as_text_delta(), Some("Hello"));

    let done = StreamEvent::done(StopReason::Stop, TokenUsage::new(10, 5));
    assert!(done.is_terminal());
    assert!(!done.is_delta());
}

#[test]
fn serde_round_trips_tagged_variants() {
    let event = StreamEvent::tool_call_start(0, "call_1", "get_weather");
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"tool_call_start\""));
    let parsed: StreamEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, event);
}

#[test]
fn error_event_is_terminal_but_not_delta() {
    let event = StreamEvent::Error { message: "503".into(), retryable: true };
    assert!(event.is_terminal());
    assert!(!event.is_delta());
}
