//! Errors surfaced by the control-plane command surface.

use std::any::Any;

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use snafu::Snafu;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum AgentError {
    #[snafu(display("session error: {source}"))]
    Session {
        source: cocode_session::SessionError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("loop error: {source}"))]
    Loop {
        source: cocode_loop::LoopError,
        #[snafu(implicit)]
        location: Location,
    },

    /// `switch_session` named a session id this manager has no record of.
    #[snafu(display("unknown session: {session_id}"))]
    UnknownSession {
        session_id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("io error at {}: {source}", path.display()))]
    Io {
        source: std::io::Error,
        path: std::path::PathBuf,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for AgentError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Session { source, .. } => source.status_code(),
            Self::Loop { source, .. } => source.status_code(),
            Self::UnknownSession { .. } => StatusCode::InvalidRequest,
            Self::Io { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T, E = AgentError> = std::result::Result<T, E>;
