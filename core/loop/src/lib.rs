//! The agent loop crate: drives PREP/STREAMING/TOOL_BATCH turns over a
//! session, provider, tool registry, and hook bus until a
//! [`result::StopReason`] is reached.

mod driver;
mod error;
mod fallback;
mod host;
mod result;

pub use driver::AgentLoop;
pub use driver::AgentLoopBuilder;
pub use error::LoopError;
pub use error::Result;
pub use fallback::FallbackAttempt;
pub use fallback::FallbackConfig;
pub use fallback::FallbackState;
pub use host::SessionHost;
pub use result::LoopResult;
pub use result::StopReason;
