//! Aggregate outcome of a completed `prompt()`/`continue()` call.

use cocode_protocol::ContentBlock;

/// Why the loop stopped driving turns.
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    MaxTurnsReached,
    /// The model returned a non-tool-use stop reason.
    ModelStopSignal,
    /// `abort()` was called, or the prompt's cancellation token fired.
    UserInterrupted,
    Error { message: String },
    /// A hook returned `{block: true}` or `{cancel: true}`.
    HookStopped { reason: String },
}

#[derive(Debug, Clone)]
pub struct LoopResult {
    pub stop_reason: StopReason,
    pub turns_completed: i32,
    pub total_input_tokens: i64,
    pub total_output_tokens: i64,
    pub final_text: String,
    pub last_response_content: Vec<ContentBlock>,
}

impl LoopResult {
    pub fn completed(turns: i32, input_tokens: i64, output_tokens: i64, text: String, content: Vec<ContentBlock>) -> Self {
        Self {
            stop_reason: StopReason::ModelStopSignal,
            turns_completed: turns,
            total_input_tokens: input_tokens,
            total_output_tokens: output_tokens,
            final_text: text,
            last_response_content: content,
        }
    }

    pub fn max_turns_reached(turns: i32, input_tokens: i64, output_tokens: i64) -> Self {
        Self {
            stop_reason: StopReason::MaxTurnsReached,
            turns_completed: turns,
            total_input_tokens: input_tokens,
            total_output_tokens: output_tokens,
            final_text: String::new(),
            last_response_content: Vec::new(),
        }
    }

    pub fn interrupted(turns: i32, input_tokens: i64, output_tokens: i64) -> Self {
        Self {
            stop_reason: StopReason::UserInterrupted,
            turns_completed: turns,
            total_input_tokens: input_tokens,
            total_output_tokens: output_tokens,
            final_text: String::new(),
            last_response_content: Vec::new(),
        }
    }

    pub fn error(turns: i32, input_tokens: i64, output_tokens: i64, message: String) -> Self {
        Self {
            stop_reason: StopReason::Error { message },
            turns_completed: turns,
            total_input_tokens: input_tokens,
            total_output_tokens: output_tokens,
            final_text: String::new(),
            last_response_content: Vec::new(),
        }
    }

    pub fn hook_stopped(turns: i32, input_tokens: i64, output_tokens: i64, reason: String) -> Self {
        Self {
            stop_reason: StopReason::HookStopped { reason },
            turns_completed: turns,
            total_input_tokens: input_tokens,
            total_output_tokens: output_tokens,
            final_text: String::new(),
            last_response_content: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "result.test.rs"]
mod tests;
