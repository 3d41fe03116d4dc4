//! The control-plane command surface: one [`AgentSession`] per driven
//! conversation, with [`SessionManager`] for the bookkeeping a host needs
//! to hold several of them open (switching, listing persisted sessions)
//! without dealing with `cocode-loop`/`cocode-session` directly.

mod error;
mod manager;
mod session;

pub use error::AgentError;
pub use error::Result;
pub use manager::SessionManager;
pub use session::AgentSession;
pub use session::AgentSessionConfig;
pub use session::AgentSessionState;
pub use session::default_tool_registry;
