//! `ErrorExt`: the trait every crate-local error enum implements so callers
//! can inspect a [`StatusCode`] without downcasting to a concrete type.

use std::any::Any;
use std::fmt;

use crate::StatusCode;

/// Source location captured at the point an error variant was constructed.
///
/// Re-exported so downstream crates don't need a direct `snafu` dependency
/// just to name the field type in their `#[snafu(implicit)]` locations.
pub type Location = snafu::Location;

/// Common behavior for all error types in the workspace.
pub trait ErrorExt: std::error::Error + Send + Sync + 'static {
    /// The status code this error maps to, used for retry/logging policy.
    fn status_code(&self) -> StatusCode;

    /// Narrow back to the concrete error type.
    fn as_any(&self) -> &dyn Any;

    /// Convenience: whether the caller should retry the operation.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// Message safe to surface to a user or put in a tool result.
    ///
    /// Errors whose status is `should_log_error() == true` are assumed to
    /// carry internal detail; the message is replaced with the status code
    /// so logs (not the LLM or the end user) are where detail lands.
    fn output_msg(&self) -> String {
        if self.status_code().should_log_error() {
            format!(
                "{} error: {}",
                self.status_code().category_label(),
                self.status_code() as i32
            )
        } else {
            self.to_string()
        }
    }
}

impl StatusCode {
    fn category_label(self) -> &'static str {
        self.name().trim_end_matches(|c: char| c.is_ascii_digit())
    }
}

/// A minimal ad-hoc [`ErrorExt`] implementation for call sites that don't
/// warrant a dedicated `snafu` enum (tests, glue code).
#[derive(Debug)]
pub struct PlainError {
    message: String,
    status: StatusCode,
}

impl PlainError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PlainError {}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A boxed [`std::error::Error`] wrapped with an explicit status code, for
/// adapting third-party errors (`std::io::Error`, etc.) at a boundary.
#[derive(Debug)]
pub struct BoxedError {
    inner: Box<dyn std::error::Error + Send + Sync>,
    status: StatusCode,
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for BoxedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl ErrorExt for BoxedError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wrap any error into a [`BoxedError`] carrying the given status code.
pub fn boxed(
    err: impl std::error::Error + Send + Sync + 'static,
    status: StatusCode,
) -> BoxedError {
    BoxedError {
        inner: Box::new(err),
        status,
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
