use std::env;

use serial_test::serial;

use super::*;

#[test]
#[serial(env)]
fn resolves_known_provider() {
    // SAFETY: serialized via #[serial(env)] so no other test observes this var concurrently.
    unsafe { env::set_var("ANTHROPIC_API_KEY", "sk-test-456") };
    let key = resolve_api_key("anthropic").unwrap();
    assert_eq!(key, "sk-test-456");
    unsafe { env::remove_var("ANTHROPIC_API_KEY") };
}

#[test]
#[serial(env)]
fn missing_credential_becomes_an_authentication_failure() {
    unsafe { env::remove_var("OPENAI_API_KEY") };
    let err = resolve_api_key("openai").unwrap_err();
    assert!(matches!(err, HyperError::AuthenticationFailed(_)));
}
