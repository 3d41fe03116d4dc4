//! Batch dispatch for a turn's tool calls.
//!
//! Unlike an incremental dispatcher that starts tools as they stream off
//! the wire, this executor operates on a complete batch: safe tools run
//! concurrently up to a settings-capped ceiling, unsafe tools run strictly
//! sequentially (and never overlap a concurrently-running safe tool), and
//! results are always handed back in the original provider-given order so
//! the caller can persist them that way regardless of completion order.

use std::sync::Arc;

use cocode_protocol::PermissionResult;
use cocode_protocol::ToolCall;
use cocode_protocol::ToolOutput;
use cocode_protocol::ValidationResult;
use cocode_protocol::WriteBatchHint;
use cocode_tools_api::Tool;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolRegistry;
use tokio::sync::Semaphore;

const DEFAULT_MAX_CONCURRENCY: usize = 10;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub max_concurrency: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { max_concurrency: DEFAULT_MAX_CONCURRENCY }
    }
}

/// One tool call's result plus, if the tool canonicalized its own
/// arguments while it ran, the form the scheduler should rewrite the
/// assistant message's recorded call to.
pub struct ToolCallOutcome {
    pub call_id: String,
    pub output: ToolOutput,
    pub canonical_args: Option<serde_json::Value>,
}

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, config: ExecutorConfig) -> Self {
        Self { registry, config }
    }

    /// Dispatches one tool batch. `ctx_for` builds a fresh `ToolContext`
    /// per call (the caller owns identity/session/cwd/cancellation
    /// wiring); this executor only attaches the write-batch hint.
    ///
    /// `should_interrupt` is checked before each call is dispatched (not
    /// between stages of an already-dispatched call), so an
    /// `InterruptMode::Immediate` steering message only skips calls that
    /// haven't started yet — anything already spawned or already running
    /// sequentially is let to finish.
    pub async fn execute_batch(
        &self,
        calls: &[ToolCall],
        ctx_for: impl Fn(&ToolCall) -> ToolContext,
        mut should_interrupt: impl FnMut() -> bool,
    ) -> Vec<ToolCallOutcome> {
        let mut outcomes: Vec<Option<ToolCallOutcome>> = (0..calls.len()).map(|_| None).collect();
        let last_index = calls.len().saturating_sub(1);
        let batch_id = calls.first().map(|c| format!("batch-{}", c.id)).unwrap_or_else(|| "batch-empty".to_string());
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut pending: Vec<(usize, tokio::task::JoinHandle<ToolCallOutcome>)> = Vec::new();

        for (index, call) in calls.iter().enumerate() {
            if should_interrupt() {
                drain_pending(&mut pending, &mut outcomes).await;
                outcomes[index] = Some(interrupted_outcome(call));
                continue;
            }

            let Some(tool) = self.registry.get(&call.name) else {
                outcomes[index] = Some(ToolCallOutcome {
                    call_id: call.id.clone(),
                    output: ToolOutput::error(format!("tool not found: {}", call.name)),
                    canonical_args: None,
                });
                continue;
            };

            let mut ctx = ctx_for(call);
            ctx.write_batch = Some(WriteBatchHint { batch_id: batch_id.clone(), flush: index == last_index });

            if tool.is_concurrency_safe_for(&call.arguments) {
                let permit = semaphore.clone();
                let tool = tool.clone();
                let args = call.arguments.clone();
                let call_id = call.id.clone();
                let handle = tokio::spawn(async move {
                    let _permit = permit.acquire_owned().await.ok();
                    run_one(tool, args, call_id, ctx).await
                });
                pending.push((index, handle));
                continue;
            }

            // An unsafe call must not overlap anything already running, so
            // drain every pending safe task before running it.
            drain_pending(&mut pending, &mut outcomes).await;
            let args = call.arguments.clone();
            let call_id = call.id.clone();
            outcomes[index] = Some(run_one(tool, args, call_id, ctx).await);
        }

        drain_pending(&mut pending, &mut outcomes).await;

        outcomes
            .into_iter()
            .map(|outcome| outcome.unwrap_or_else(|| missing_outcome()))
            .collect()
    }
}

async fn drain_pending(pending: &mut Vec<(usize, tokio::task::JoinHandle<ToolCallOutcome>)>, outcomes: &mut [Option<ToolCallOutcome>]) {
    for (index, handle) in pending.drain(..) {
        outcomes[index] = Some(match handle.await {
            Ok(outcome) => outcome,
            Err(err) => ToolCallOutcome {
                call_id: String::new(),
                output: ToolOutput::error(format!("tool task panicked: {err}")),
                canonical_args: None,
            },
        });
    }
}

fn missing_outcome() -> ToolCallOutcome {
    ToolCallOutcome {
        call_id: String::new(),
        output: ToolOutput::error("internal: tool call produced no outcome"),
        canonical_args: None,
    }
}

fn interrupted_outcome(call: &ToolCall) -> ToolCallOutcome {
    ToolCallOutcome {
        call_id: call.id.clone(),
        output: ToolOutput::error("interrupted by a steering message before execution"),
        canonical_args: None,
    }
}

async fn run_one(tool: Arc<dyn Tool>, args: serde_json::Value, call_id: String, mut ctx: ToolContext) -> ToolCallOutcome {
    if let ValidationResult::Invalid { errors } = tool.validate(&args).await {
        let message = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
        return ToolCallOutcome { call_id, output: ToolOutput::error(format!("invalid input: {message}")), canonical_args: None };
    }

    if let PermissionResult::Denied { reason } = tool.check_permission(&args, &ctx).await {
        return ToolCallOutcome { call_id, output: ToolOutput::error(format!("permission denied: {reason}")), canonical_args: None };
    }

    let output = match tool.execute(args, &mut ctx).await {
        Ok(output) => tool.post_process(output, &ctx).await,
        Err(err) => ToolOutput::error(err.to_string()),
    };
    tool.cleanup(&ctx).await;
    let canonical_args = ctx.take_canonical_args().await;
    ToolCallOutcome { call_id, output, canonical_args }
}

#[cfg(test)]
#[path = "executor.test.rs"]
mod tests;
