//! Compaction errors. A failure here never aborts the turn — the loop
//! logs a warning and proceeds uncompacted — so this type exists mostly
//! for the summarizer boundary, not as something that escapes the crate.

use std::any::Any;

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use snafu::Snafu;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum CompactError {
    #[snafu(display("summarization call failed: {message}"))]
    Summarize {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("no entries to summarize"))]
    EmptyWindow {
        #[snafu(implicit)]
        location: Location,
    },
}

impl CompactError {
    /// Public constructor for summarizer implementations living outside
    /// this crate (e.g. a provider-backed one in the loop crate) that need
    /// to report a failed summarization call.
    pub fn summarize_failed(message: impl Into<String>) -> Self {
        compact_error::SummarizeSnafu { message: message.into() }.build()
    }
}

impl ErrorExt for CompactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Summarize { .. } => StatusCode::ProviderError,
            Self::EmptyWindow { .. } => StatusCode::InvalidArguments,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
