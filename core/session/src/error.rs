//! Session store errors.

use std::any::Any;
use std::path::PathBuf;

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use snafu::Snafu;
use uuid::Uuid;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum SessionError {
    #[snafu(display("failed to open session file {}: {source}", path.display()))]
    Open {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to append to session file {}: {source}", path.display()))]
    Append {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("malformed session entry on line {line}: {source}"))]
    MalformedEntry {
        line: usize,
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("entry {id} not found on this branch"))]
    EntryNotFound {
        id: Uuid,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("session has no header entry"))]
    MissingHeader {
        #[snafu(implicit)]
        location: Location,
    },

    /// Covers continue-from-assistant, append-after-shutdown, and
    /// prompt-while-streaming. Session is left untouched when this is
    /// raised.
    #[snafu(display("invalid session state: {message}"))]
    State {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for SessionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Open { .. } => StatusCode::IoError,
            Self::Append { .. } => StatusCode::IoError,
            Self::MalformedEntry { .. } => StatusCode::ParseError,
            Self::EntryNotFound { .. } => StatusCode::InvalidArguments,
            Self::MissingHeader { .. } => StatusCode::InvalidArguments,
            Self::State { .. } => StatusCode::InvalidRequest,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;
