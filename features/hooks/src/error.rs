//! Hook dispatch errors.

use std::any::Any;

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use snafu::Snafu;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum HookError {
    #[snafu(display("hook host rejected sendMessage: {message}"))]
    SendMessage {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("hook host rejected appendEntry: {message}"))]
    AppendEntry {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("exec failed: {source}"))]
    Exec {
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    /// Fail-closed veto: a `tool_call` handler
    /// panicked or timed out, so the call is treated as blocked.
    #[snafu(display("hook {hook_name} failed closed: {reason}"))]
    FailedClosed {
        hook_name: String,
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl HookError {
    /// Public constructors for hosts outside this crate (the loop crate's
    /// `SessionHost`) that need to report a session-append failure without
    /// reaching into this crate's `pub(crate)` snafu selector module.
    pub fn send_message(message: impl Into<String>) -> Self {
        hook_error::SendMessageSnafu { message: message.into() }.build()
    }

    pub fn append_entry(message: impl Into<String>) -> Self {
        hook_error::AppendEntrySnafu { message: message.into() }.build()
    }
}

impl ErrorExt for HookError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SendMessage { .. } => StatusCode::InvalidRequest,
            Self::AppendEntry { .. } => StatusCode::InvalidRequest,
            Self::Exec { .. } => StatusCode::IoError,
            Self::FailedClosed { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, HookError>;
