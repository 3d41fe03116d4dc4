use super::*;

#[test]
fn timeout_and_io_are_retriable() {
    let timeout = tool_error::TimeoutSnafu { timeout_secs: 5_i64 }.build();
    assert!(timeout.is_retriable());
    let io = ToolError::from(std::io::Error::other("disk full"));
    assert!(io.is_retriable());
}

#[test]
fn cancelled_reports_as_cancelled_status() {
    let err = tool_error::CancelledSnafu.build();
    assert!(err.is_cancelled());
    assert_eq!(err.status_code(), StatusCode::Cancelled);
}

#[test]
fn hook_rejected_maps_to_permission_denied_status() {
    let err = tool_error::HookRejectedSnafu { reason: "blocked by policy".to_string() }.build();
    assert_eq!(err.status_code(), StatusCode::PermissionDenied);
}

#[test]
fn invalid_json_input_becomes_invalid_input_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let err = ToolError::from(json_err);
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
}
