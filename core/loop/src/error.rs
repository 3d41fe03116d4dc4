//! Agent loop errors.

use std::any::Any;

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use hyper_sdk::HyperError;
use snafu::Snafu;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum LoopError {
    #[snafu(display("session error: {source}"))]
    Session {
        source: cocode_session::SessionError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("provider error: {source}"))]
    Provider {
        source: HyperError,
        #[snafu(implicit)]
        location: Location,
    },

    /// `continue()` called when the branch's last message has role
    /// assistant, or a prompt arrived while a previous one is still
    /// streaming.
    #[snafu(display("invalid loop state: {message}"))]
    State {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("a hook blocked this operation: {reason}"))]
    HookBlocked {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for LoopError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Session { source, .. } => source.status_code(),
            Self::Provider { .. } => StatusCode::ProviderError,
            Self::State { .. } => StatusCode::InvalidRequest,
            Self::HookBlocked { .. } => StatusCode::PermissionDenied,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T, E = LoopError> = std::result::Result<T, E>;
