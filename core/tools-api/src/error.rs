//! Errors surfaced by the tool contract's 5-stage pipeline.

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use snafu::Snafu;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum ToolError {
    #[snafu(display("tool not found: {name}"))]
    NotFound {
        name: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid input: {message}"))]
    InvalidInput {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("execution failed: {message}"))]
    ExecutionFailed {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("permission denied: {message}"))]
    PermissionDenied {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("timeout after {timeout_secs}s"))]
    Timeout {
        timeout_secs: i64,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("aborted: {reason}"))]
    Aborted {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("io error: {message}"))]
    Io {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("internal error: {message}"))]
    Internal {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("hook rejected: {reason}"))]
    HookRejected {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("cancelled"))]
    Cancelled {
        #[snafu(implicit)]
        location: Location,
    },
}

impl ToolError {
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Io { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Public constructors for crates that implement `Tool` but live
    /// outside this one, where the snafu selector module stays `pub(crate)`.
    pub fn not_found(name: impl Into<String>) -> Self {
        tool_error::NotFoundSnafu { name: name.into() }.build()
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        tool_error::InvalidInputSnafu { message: message.into() }.build()
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        tool_error::ExecutionFailedSnafu { message: message.into() }.build()
    }

    pub fn internal(message: impl Into<String>) -> Self {
        tool_error::InternalSnafu { message: message.into() }.build()
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        tool_error::PermissionDeniedSnafu { message: message.into() }.build()
    }

    pub fn timeout(timeout_secs: i64) -> Self {
        tool_error::TimeoutSnafu { timeout_secs }.build()
    }

    pub fn aborted(reason: impl Into<String>) -> Self {
        tool_error::AbortedSnafu { reason: reason.into() }.build()
    }

    pub fn hook_rejected(reason: impl Into<String>) -> Self {
        tool_error::HookRejectedSnafu { reason: reason.into() }.build()
    }

    pub fn cancelled() -> Self {
        tool_error::CancelledSnafu.build()
    }
}

impl ErrorExt for ToolError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::InvalidArguments,
            Self::InvalidInput { .. } => StatusCode::InvalidArguments,
            Self::ExecutionFailed { .. } => StatusCode::External,
            Self::PermissionDenied { .. } => StatusCode::PermissionDenied,
            Self::Timeout { .. } => StatusCode::Timeout,
            Self::Aborted { .. } => StatusCode::Cancelled,
            Self::Io { .. } => StatusCode::IoError,
            Self::Internal { .. } => StatusCode::Internal,
            Self::HookRejected { .. } => StatusCode::PermissionDenied,
            Self::Cancelled { .. } => StatusCode::Cancelled,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        tool_error::IoSnafu { message: err.to_string() }.build()
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        tool_error::InvalidInputSnafu { message: format!("json error: {err}") }.build()
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
