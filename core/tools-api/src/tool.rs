//! The `Tool` trait's 5-stage pipeline: validate, check permission,
//! execute, post-process, cleanup.

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::PermissionResult;
use cocode_protocol::ToolOutput;
use cocode_protocol::ValidationError;
use cocode_protocol::ValidationResult;
use hyper_sdk::ToolDefinition;
use serde_json::Value;

use crate::context::ToolContext;
use crate::error::ToolError;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> Value;

    /// Default `Safe`; override for tools that mutate shared state (file
    /// writes, shell commands) so the executor serializes them.
    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    /// Per-call refinement of [`Self::concurrency_safety`] for tools whose
    /// safety depends on the arguments of a specific invocation rather than
    /// the tool type alone (a read-only shell command vs. an arbitrary one).
    /// Defaults to the type-level verdict.
    fn is_concurrency_safe_for(&self, _input: &Value) -> bool {
        matches!(self.concurrency_safety(), ConcurrencySafety::Safe)
    }

    /// Stage 1. Default implementation only checks the schema's `required`
    /// array is present on the input; tools with richer shapes override.
    async fn validate(&self, input: &Value) -> ValidationResult {
        let schema = self.input_schema();
        if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
            for field in required {
                if let Some(field_name) = field.as_str()
                    && input.get(field_name).is_none()
                {
                    return ValidationResult::Invalid {
                        errors: vec![ValidationError::with_path(format!("missing required field: {field_name}"), field_name)],
                    };
                }
            }
        }
        ValidationResult::Valid
    }

    /// Stage 2. Default allows; tools gated behind approval override this
    /// to consult `ctx`'s approval store and permission mode.
    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    /// Stage 3. The tool's actual work.
    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput, ToolError>;

    /// Stage 4. Default passes output through unchanged.
    async fn post_process(&self, output: ToolOutput, _ctx: &ToolContext) -> ToolOutput {
        output
    }

    /// Stage 5. Default does nothing.
    async fn cleanup(&self, _ctx: &ToolContext) {}

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::full(self.name(), self.description(), self.input_schema())
    }

    fn is_concurrent_safe(&self) -> bool {
        matches!(self.concurrency_safety(), ConcurrencySafety::Safe)
    }
}

#[cfg(test)]
#[path = "tool.test.rs"]
mod tests;
