use super::*;

#[test]
fn plain_error_reports_status() {
    let err = PlainError::new("test error", StatusCode::InvalidArguments);
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
    assert_eq!(err.to_string(), "test error");
    assert!(!err.is_retryable());
}

#[test]
fn plain_error_retryable_follows_status() {
    let err = PlainError::new("network error", StatusCode::NetworkError);
    assert!(err.is_retryable());
}

#[test]
fn output_msg_hides_internal_detail() {
    let err = PlainError::new("sensitive details", StatusCode::Internal);
    assert_eq!(err.output_msg(), "Internal error: 1001");
}

#[test]
fn output_msg_shows_user_facing_errors() {
    let err = PlainError::new("Invalid parameter: foo", StatusCode::InvalidArguments);
    assert_eq!(err.output_msg(), "Invalid parameter: foo");
}

#[test]
fn boxed_error_preserves_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let wrapped = boxed(io_err, StatusCode::FileNotFound);

    assert_eq!(wrapped.status_code(), StatusCode::FileNotFound);
    assert!(std::error::Error::source(&wrapped).is_some());
}
