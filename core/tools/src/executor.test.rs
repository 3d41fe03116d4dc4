use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use cocode_protocol::ConcurrencySafety;
use cocode_protocol::ToolResultContent;

use super::*;

struct RecordingTool {
    name: &'static str,
    safety: ConcurrencySafety,
    log: Arc<StdMutex<Vec<String>>>,
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "records its own execution for ordering assertions"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        self.safety
    }

    async fn execute(&self, _input: serde_json::Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).push(self.name.to_string());
        let flush = ctx.should_flush();
        Ok(ToolOutput::text(format!("{}:{flush}", self.name)))
    }
}

struct CanonicalizingTool;

#[async_trait]
impl Tool for CanonicalizingTool {
    fn name(&self) -> &str {
        "canon"
    }

    fn description(&self) -> &str {
        "reports a canonicalized argument back to the caller"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: serde_json::Value, ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        ctx.set_canonical_args(serde_json::json!({"file_path": "/abs/path"})).await;
        Ok(ToolOutput::text("ok"))
    }
}

fn ctx_for(call: &cocode_protocol::ToolCall) -> ToolContext {
    ToolContext::new(call.id.clone(), "session-1", PathBuf::from("/tmp"))
}

#[tokio::test]
async fn results_are_returned_in_provider_given_order_regardless_of_completion_order() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let mut registry = ToolRegistry::new();
    registry.register(RecordingTool { name: "first", safety: ConcurrencySafety::Safe, log: log.clone() });
    registry.register(RecordingTool { name: "second", safety: ConcurrencySafety::Safe, log: log.clone() });
    let executor = ToolExecutor::new(Arc::new(registry), ExecutorConfig::default());
    let calls = vec![
        cocode_protocol::ToolCall::new("call-1", "first", serde_json::json!({})),
        cocode_protocol::ToolCall::new("call-2", "second", serde_json::json!({})),
    ];

    let outcomes = executor.execute_batch(&calls, ctx_for, || false).await;
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].call_id, "call-1");
    assert_eq!(outcomes[1].call_id, "call-2");
}

#[tokio::test]
async fn unknown_tool_becomes_a_synthetic_error_result() {
    let registry = ToolRegistry::new();
    let executor = ToolExecutor::new(Arc::new(registry), ExecutorConfig::default());
    let calls = vec![cocode_protocol::ToolCall::new("call-1", "Nonexistent", serde_json::json!({}))];

    let outcomes = executor.execute_batch(&calls, ctx_for, || false).await;
    assert!(outcomes[0].output.is_error);
}

#[tokio::test]
async fn only_the_last_call_in_the_batch_is_flushed() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let mut registry = ToolRegistry::new();
    registry.register(RecordingTool { name: "first", safety: ConcurrencySafety::Safe, log: log.clone() });
    registry.register(RecordingTool { name: "second", safety: ConcurrencySafety::Safe, log: log.clone() });
    let executor = ToolExecutor::new(Arc::new(registry), ExecutorConfig::default());
    let calls = vec![
        cocode_protocol::ToolCall::new("call-1", "first", serde_json::json!({})),
        cocode_protocol::ToolCall::new("call-2", "second", serde_json::json!({})),
    ];

    let outcomes = executor.execute_batch(&calls, ctx_for, || false).await;
    let ToolResultContent::Text(first) = &outcomes[0].output.content else { panic!("expected text") };
    let ToolResultContent::Text(second) = &outcomes[1].output.content else { panic!("expected text") };
    assert_eq!(first, "first:false");
    assert_eq!(second, "second:true");
}

#[tokio::test]
async fn unsafe_calls_run_sequentially_around_safe_ones() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let mut registry = ToolRegistry::new();
    registry.register(RecordingTool { name: "safe-a", safety: ConcurrencySafety::Safe, log: log.clone() });
    registry.register(RecordingTool { name: "unsafe-b", safety: ConcurrencySafety::Unsafe, log: log.clone() });
    registry.register(RecordingTool { name: "safe-c", safety: ConcurrencySafety::Safe, log: log.clone() });
    let executor = ToolExecutor::new(Arc::new(registry), ExecutorConfig::default());
    let calls = vec![
        cocode_protocol::ToolCall::new("call-1", "safe-a", serde_json::json!({})),
        cocode_protocol::ToolCall::new("call-2", "unsafe-b", serde_json::json!({})),
        cocode_protocol::ToolCall::new("call-3", "safe-c", serde_json::json!({})),
    ];

    let outcomes = executor.execute_batch(&calls, ctx_for, || false).await;
    assert_eq!(outcomes.len(), 3);
    let recorded = log.lock().unwrap_or_else(|e| e.into_inner()).clone();
    // unsafe-b must appear after safe-a finished and before safe-c starts,
    // since it is drained/executed strictly between the two safe groups.
    let position_of = |name: &str| recorded.iter().position(|n| n == name).unwrap();
    assert!(position_of("safe-a") < position_of("unsafe-b"));
    assert!(position_of("unsafe-b") < position_of("safe-c"));
}

struct InterruptingTool {
    name: &'static str,
    interrupt_after: Arc<std::sync::atomic::AtomicBool>,
    log: Arc<StdMutex<Vec<String>>>,
}

#[async_trait]
impl Tool for InterruptingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "flips the shared interrupt flag once it finishes running"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    async fn execute(&self, _input: serde_json::Value, _ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).push(self.name.to_string());
        self.interrupt_after.store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(ToolOutput::text(self.name))
    }
}

#[tokio::test]
async fn an_interrupt_arriving_mid_batch_only_skips_calls_not_yet_dispatched() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let interrupt_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let mut registry = ToolRegistry::new();
    registry.register(InterruptingTool { name: "first", interrupt_after: interrupt_flag.clone(), log: log.clone() });
    registry.register(InterruptingTool { name: "second", interrupt_after: interrupt_flag.clone(), log: log.clone() });
    let executor = ToolExecutor::new(Arc::new(registry), ExecutorConfig::default());
    let calls = vec![
        cocode_protocol::ToolCall::new("call-1", "first", serde_json::json!({})),
        cocode_protocol::ToolCall::new("call-2", "second", serde_json::json!({})),
    ];

    let outcomes = executor.execute_batch(&calls, ctx_for, || interrupt_flag.load(std::sync::atomic::Ordering::SeqCst)).await;

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].output.is_error);
    let ToolResultContent::Text(first) = &outcomes[0].output.content else { panic!("expected text") };
    assert_eq!(first, "first");

    assert!(outcomes[1].output.is_error);
    let ToolResultContent::Text(second) = &outcomes[1].output.content else { panic!("expected text") };
    assert!(second.contains("interrupted"));

    // "second" never ran at all.
    assert_eq!(log.lock().unwrap_or_else(|e| e.into_inner()).clone(), vec!["first".to_string()]);
}

#[tokio::test]
async fn canonicalized_arguments_are_surfaced_to_the_caller() {
    let mut registry = ToolRegistry::new();
    registry.register(CanonicalizingTool);
    let executor = ToolExecutor::new(Arc::new(registry), ExecutorConfig::default());
    let calls = vec![cocode_protocol::ToolCall::new("call-1", "canon", serde_json::json!({}))];

    let outcomes = executor.execute_batch(&calls, ctx_for, || false).await;
    assert_eq!(outcomes[0].canonical_args, Some(serde_json::json!({"file_path": "/abs/path"})));
}
