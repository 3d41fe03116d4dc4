//! Shared error taxonomy for the workspace.
//!
//! Every crate-local error enum derives `snafu::Snafu`, implements
//! [`ErrorExt`] to expose a [`StatusCode`], and is annotated with
//! `#[stack_trace_debug]` so its `Debug` impl prints a readable chain
//! instead of a raw struct dump.

mod ext;
mod status_code;

pub use cocode_stack_trace_macro::stack_trace_debug;
pub use ext::BoxedError;
pub use ext::ErrorExt;
pub use ext::Location;
pub use ext::PlainError;
pub use ext::boxed;
pub use status_code::StatusCategory;
pub use status_code::StatusCode;
pub use status_code::StatusMeta;
