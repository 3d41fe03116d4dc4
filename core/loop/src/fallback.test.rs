use super::*;

#[test]
fn disabled_fallback_never_triggers() {
    let config = FallbackConfig::default();
    let state = FallbackState::new("gpt-primary");
    assert!(!state.should_fallback(&config));
}

#[test]
fn next_model_follows_declared_order() {
    let config = FallbackConfig { enabled: true, fallback_models: vec!["b".into(), "c".into()], max_fallbacks: 3 };
    let mut state = FallbackState::new("a");
    assert_eq!(state.next_model(&config), Some("b".to_string()));
    state.record_fallback("b", "rate limited");
    assert_eq!(state.next_model(&config), Some("c".to_string()));
    assert_eq!(state.current_model, "b");
    assert_eq!(state.attempts, 1);
}

#[test]
fn should_fallback_respects_max_fallbacks() {
    let config = FallbackConfig { enabled: true, fallback_models: vec!["b".into()], max_fallbacks: 1 };
    let mut state = FallbackState::new("a");
    assert!(state.should_fallback(&config));
    state.record_fallback("b", "timeout");
    assert!(!state.should_fallback(&config));
}

#[test]
fn history_records_reason() {
    let mut state = FallbackState::new("a");
    state.record_fallback("b", "provider error 503");
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].reason, "provider error 503");
}
