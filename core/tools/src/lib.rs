//! Built-in tools and the batch executor that dispatches a turn's tool
//! calls against them.

mod builtin;
mod executor;

pub use builtin::BashTool;
pub use builtin::EditTool;
pub use builtin::FindTool;
pub use builtin::GrepTool;
pub use builtin::ReadTool;
pub use builtin::WriteTool;
pub use executor::ExecutorConfig;
pub use executor::ToolCallOutcome;
pub use executor::ToolExecutor;

/// Registers the six built-in tools under their canonical names.
pub fn register_builtin_tools(registry: &mut cocode_tools_api::ToolRegistry) {
    registry.register(ReadTool::new());
    registry.register(WriteTool::new());
    registry.register(EditTool::new());
    registry.register(GrepTool::new());
    registry.register(FindTool::new());
    registry.register(BashTool::new());
}
