use std::sync::Arc;

use async_trait::async_trait;
use cocode_hooks::HookApi;
use cocode_hooks::HookContext;
use cocode_hooks::HookEvent;
use cocode_hooks::HookEventKind;
use cocode_hooks::HookHandler;
use cocode_hooks::HookRegistry;
use cocode_hooks::HookResult;
use cocode_protocol::SessionHeader;
use cocode_protocol::ToolOutput;
use cocode_session::SessionStore;
use cocode_tools_api::Tool;
use cocode_tools_api::ToolContext;
use cocode_tools_api::ToolRegistry;
use hyper_sdk::MockProvider;
use hyper_sdk::MockReply;
use tempfile::TempDir;
use tokio::sync::Mutex as AsyncMutex;

use super::*;

fn header() -> SessionHeader {
    SessionHeader {
        session_id: "s1".into(),
        cwd: "/work".into(),
        provider: "mock".into(),
        model_id: "mock-model".into(),
        thinking_level: None,
        branched_from: None,
    }
}

fn new_session(dir: &TempDir) -> Arc<AsyncMutex<SessionStore>> {
    let path = dir.path().join("s.jsonl");
    let store = SessionStore::open_or_create(path, header()).unwrap();
    Arc::new(AsyncMutex::new(store))
}

struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "echoes its input back as the result"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {"text": {"type": "string"}}})
    }

    async fn execute(&self, input: serde_json::Value, _ctx: &mut ToolContext) -> cocode_tools_api::Result<ToolOutput> {
        let text = input.get("text").and_then(|v| v.as_str()).unwrap_or_default();
        Ok(ToolOutput::text(text.to_string()))
    }
}

struct BlockAllToolCalls;

#[async_trait]
impl HookHandler for BlockAllToolCalls {
    async fn handle(&self, _event: &HookEvent, _ctx: &HookContext, _api: &HookApi) -> HookResult {
        HookResult::Block { reason: "not allowed in this test".to_string() }
    }
}

fn text_only_loop(dir: &TempDir, replies: Vec<MockReply>) -> AgentLoop {
    AgentLoop::builder()
        .session(new_session(dir))
        .provider(Arc::new(MockProvider::new("mock", replies)))
        .tool_registry(Arc::new(ToolRegistry::new()))
        .build()
}

#[tokio::test]
async fn prompt_with_a_text_reply_completes_in_one_turn() {
    let dir = TempDir::new().unwrap();
    let mut agent_loop = text_only_loop(&dir, vec![MockReply::text("hello there")]);

    let result = agent_loop.prompt("hi").await.unwrap();

    assert_eq!(result.stop_reason, StopReason::ModelStopSignal);
    assert_eq!(result.turns_completed, 1);
    assert_eq!(result.final_text, "hello there");
}

#[tokio::test]
async fn tool_call_dispatches_and_loops_back_for_a_second_reply() {
    let dir = TempDir::new().unwrap();
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let replies = vec![
        MockReply::tool_call("call-1", "echo", serde_json::json!({"text": "ping"})),
        MockReply::text("done"),
    ];

    let mut agent_loop = AgentLoop::builder()
        .session(new_session(&dir))
        .provider(Arc::new(MockProvider::new("mock", replies)))
        .tool_registry(Arc::new(registry))
        .build();

    let result = agent_loop.prompt("hi").await.unwrap();

    assert_eq!(result.stop_reason, StopReason::ModelStopSignal);
    assert_eq!(result.turns_completed, 2);
    assert_eq!(result.final_text, "done");

    let branch = agent_loop.session().lock().await.branch();
    let tool_results: Vec<_> = branch
        .iter()
        .filter_map(|e| match &e.payload {
            cocode_protocol::EntryPayload::ToolResult(m) => Some(m),
            _ => None,
        })
        .collect();
    assert_eq!(tool_results.len(), 1);
    assert!(!tool_results[0].is_error);
    assert_eq!(tool_results[0].content.as_text(), "ping");
}

#[tokio::test]
async fn max_turns_stops_the_loop_even_with_pending_tool_calls() {
    let dir = TempDir::new().unwrap();
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let replies = vec![MockReply::tool_call("call-1", "echo", serde_json::json!({"text": "ping"}))];

    let mut agent_loop = AgentLoop::builder()
        .session(new_session(&dir))
        .provider(Arc::new(MockProvider::new("mock", replies)))
        .tool_registry(Arc::new(registry))
        .config(cocode_protocol::LoopConfig { max_turns: Some(1), ..cocode_protocol::LoopConfig::default() })
        .build();

    let result = agent_loop.prompt("hi").await.unwrap();

    assert_eq!(result.stop_reason, StopReason::MaxTurnsReached);
    assert_eq!(result.turns_completed, 1);
}

#[tokio::test]
async fn abort_before_prompt_produces_user_interrupted() {
    let dir = TempDir::new().unwrap();
    let mut agent_loop = text_only_loop(&dir, vec![MockReply::text("unreachable")]);

    agent_loop.abort();
    let result = agent_loop.prompt("hi").await.unwrap();

    assert_eq!(result.stop_reason, StopReason::UserInterrupted);
}

#[tokio::test]
async fn hook_block_on_tool_call_produces_a_synthetic_error_result_without_running_the_tool() {
    let dir = TempDir::new().unwrap();
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let hooks = Arc::new(HookRegistry::new());
    hooks.register("block-all-tools", HookEventKind::ToolCall, Arc::new(BlockAllToolCalls));

    let replies = vec![
        MockReply::tool_call("call-1", "echo", serde_json::json!({"text": "ping"})),
        MockReply::text("done"),
    ];

    let mut agent_loop = AgentLoop::builder()
        .session(new_session(&dir))
        .provider(Arc::new(MockProvider::new("mock", replies)))
        .tool_registry(Arc::new(registry))
        .hooks(hooks)
        .build();

    let result = agent_loop.prompt("hi").await.unwrap();

    assert_eq!(result.stop_reason, StopReason::ModelStopSignal);
    let branch = agent_loop.session().lock().await.branch();
    let tool_results: Vec<_> = branch
        .iter()
        .filter_map(|e| match &e.payload {
            cocode_protocol::EntryPayload::ToolResult(m) => Some(m),
            _ => None,
        })
        .collect();
    assert_eq!(tool_results.len(), 1);
    assert!(tool_results[0].is_error);
    assert!(tool_results[0].content.as_text().contains("blocked by hook"));
}

#[tokio::test]
async fn continue_loop_errors_when_branch_already_ends_on_an_assistant_message() {
    let dir = TempDir::new().unwrap();
    let mut agent_loop = text_only_loop(&dir, vec![MockReply::text("hello")]);
    agent_loop.prompt("hi").await.unwrap();

    let err = agent_loop.continue_loop().await.unwrap_err();
    assert!(matches!(err, LoopError::State { .. }));
}
