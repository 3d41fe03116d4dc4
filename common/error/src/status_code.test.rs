use super::*;

#[test]
fn success_is_zero() {
    assert!(StatusCode::is_success(0));
    assert!(!StatusCode::is_success(1));
}

#[test]
fn retryable_flags_match_category() {
    assert!(StatusCode::RateLimited.is_retryable());
    assert!(!StatusCode::InvalidArguments.is_retryable());
    assert_eq!(StatusCode::RateLimited.category(), StatusCategory::Resource);
}

#[test]
fn round_trips_through_i32() {
    let code = StatusCode::ContextWindowExceeded;
    let value = code as i32;
    assert_eq!(StatusCode::from_i32(value), Some(StatusCode::ContextWindowExceeded));
}

#[test]
fn display_matches_name() {
    assert_eq!(StatusCode::IoError.to_string(), "IoError");
    assert_eq!(StatusCode::IoError.name(), "IoError");
}
