use std::env;

use cocode_error::ErrorExt;
use serial_test::serial;

use super::*;

#[test]
#[serial(env)]
fn resolves_known_provider_from_its_own_var() {
    // SAFETY: serialized via #[serial(env)] so no other test observes this var concurrently.
    unsafe { env::set_var("ANTHROPIC_API_KEY", "sk-test-123") };
    let key = resolve_api_key("anthropic").unwrap();
    assert_eq!(key, "sk-test-123");
    unsafe { env::remove_var("ANTHROPIC_API_KEY") };
}

#[test]
#[serial(env)]
fn missing_var_is_a_missing_credential_error() {
    unsafe { env::remove_var("OPENAI_API_KEY") };
    let err = resolve_api_key("openai").unwrap_err();
    assert_eq!(err.status_code(), cocode_error::StatusCode::AuthenticationFailed);
}

#[test]
fn unknown_provider_is_a_missing_credential_error() {
    let err = resolve_api_key("unheard-of").unwrap_err();
    assert_eq!(err.status_code(), cocode_error::StatusCode::AuthenticationFailed);
}
