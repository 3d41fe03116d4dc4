use super::*;

#[test]
fn rate_limit_and_network_errors_are_retryable() {
    assert!(HyperError::RateLimitExceeded { retry_after_secs: Some(5) }.is_retryable());
    assert!(HyperError::NetworkError("timeout".into()).is_retryable());
    assert!(!HyperError::InvalidRequest("bad schema".into()).is_retryable());
}

#[test]
fn retry_delay_only_present_on_rate_limit() {
    let err = HyperError::RateLimitExceeded { retry_after_secs: Some(30) };
    assert_eq!(err.retry_delay_secs(), Some(30));
    assert_eq!(HyperError::Cancelled.retry_delay_secs(), None);
}

#[test]
fn provider_error_is_retryable() {
    let err = HyperError::ProviderError { code: "503".into(), message: "overloaded".into() };
    assert!(err.is_retryable());
}
