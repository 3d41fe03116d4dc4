//! The tool contract: what a tool looks like, the context it runs with, and
//! the registry that looks tools up by name.

mod context;
mod error;
mod permission;
mod registry;
mod tool;

pub use context::ApprovalStore;
pub use context::FileTracker;
pub use context::ToolContext;
pub use context::ToolContextBuilder;
pub use error::Result;
pub use error::ToolError;
pub use permission::PermissionMode;
pub use registry::ToolRegistry;
pub use tool::Tool;
