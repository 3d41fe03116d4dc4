use std::collections::HashMap;

use cocode_error::ErrorExt;

use super::*;

fn lookup(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
    move |name| vars.get(name).map(|v| v.to_string())
}

#[test]
fn no_overrides_leaves_defaults_untouched() {
    let config = apply(RuntimeConfig::default(), lookup(HashMap::new())).unwrap();
    assert_eq!(config, RuntimeConfig::default());
}

#[test]
fn overrides_named_fields_only() {
    let mut vars = HashMap::new();
    vars.insert(MAX_CONCURRENT_TOOLS, "16");
    vars.insert(COMPACT_ENABLED, "false");
    let config = apply(RuntimeConfig::default(), lookup(vars)).unwrap();
    assert_eq!(config.r#loop.max_concurrent_tools, 16);
    assert!(!config.compact.enabled);
    assert_eq!(config.r#loop.retry, cocode_protocol::RetryConfig::default());
}

#[test]
fn unparsable_value_is_rejected() {
    let mut vars = HashMap::new();
    vars.insert(RETRY_MAX_RETRIES, "not-a-number");
    let err = apply(RuntimeConfig::default(), lookup(vars)).unwrap_err();
    assert_eq!(err.status_code(), cocode_error::StatusCode::InvalidConfig);
}

#[test]
fn max_turns_override_parses_optional_field() {
    let mut vars = HashMap::new();
    vars.insert(MAX_TURNS, "42");
    let config = apply(RuntimeConfig::default(), lookup(vars)).unwrap();
    assert_eq!(config.r#loop.max_turns, Some(42));
}
