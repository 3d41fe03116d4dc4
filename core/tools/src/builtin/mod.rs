//! The six built-in tools used to exercise the tool contract end to end.

mod bash;
mod edit;
mod find;
mod grep;
mod read;
mod write;

pub use bash::BashTool;
pub use edit::EditTool;
pub use find::FindTool;
pub use grep::GrepTool;
pub use read::ReadTool;
pub use write::WriteTool;
