//! Wire types shared across the agent runtime crates: session entries,
//! loop events, hook events, tool protocol shapes, and loop/compaction
//! configuration. No behavior lives here — just the types every other
//! crate serializes, matches on, or passes by value.

mod config;
mod content;
mod entry;
mod hook_event;
mod loop_event;
mod tool_types;
mod usage;

pub use config::CompactConfig;
pub use config::DrainMode;
pub use config::InterruptMode;
pub use config::LoopConfig;
pub use config::RetryConfig;
pub use content::ContentBlock;
pub use content::ImageSource;
pub use content::ToolCall;
pub use content::ToolResultContent;
pub use content::ToolResultRef;
pub use entry::AssistantMessage;
pub use entry::BashExecutionMessage;
pub use entry::BranchSummaryEntry;
pub use entry::CompactionEntry;
pub use entry::CustomContent;
pub use entry::CustomEntry;
pub use entry::CustomMessageEntry;
pub use entry::EntryPayload;
pub use entry::LabelEntry;
pub use entry::ModelChangeEntry;
pub use entry::SessionEntry;
pub use entry::SessionHeader;
pub use entry::StopReason;
pub use entry::ThinkingLevelChangeEntry;
pub use entry::ToolResultMessage;
pub use entry::UserMessage;
pub use hook_event::HookEvent;
pub use hook_event::HookEventKind;
pub use loop_event::LoopEvent;
pub use loop_event::PartialAssistantMessage;
pub use tool_types::ConcurrencySafety;
pub use tool_types::PermissionResult;
pub use tool_types::ToolOutput;
pub use tool_types::ValidationError;
pub use tool_types::ValidationResult;
pub use tool_types::WriteBatchHint;
pub use usage::TokenUsage;
