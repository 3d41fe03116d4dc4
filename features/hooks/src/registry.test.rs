use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use cocode_protocol::HookEvent;

use super::*;

struct RecordingHandler {
    name: &'static str,
    log: Arc<StdMutex<Vec<String>>>,
    result: HookResult,
}

#[async_trait]
impl HookHandler for RecordingHandler {
    async fn handle(&self, _event: &HookEvent, _ctx: &HookContext, _api: &HookApi) -> HookResult {
        self.log.lock().unwrap().push(self.name.to_string());
        self.result.clone()
    }
}

struct SlowHandler;

#[async_trait]
impl HookHandler for SlowHandler {
    async fn handle(&self, _event: &HookEvent, _ctx: &HookContext, _api: &HookApi) -> HookResult {
        tokio::time::sleep(Duration::from_secs(5)).await;
        HookResult::Continue
    }
}

fn ctx() -> HookContext {
    HookContext::new("session-1", std::path::PathBuf::from("/tmp"))
}

#[tokio::test]
async fn handlers_run_in_registration_order() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let registry = HookRegistry::new();
    registry.register("first", HookEventKind::AgentStart, Arc::new(RecordingHandler { name: "first", log: log.clone(), result: HookResult::Continue }));
    registry.register("second", HookEventKind::AgentStart, Arc::new(RecordingHandler { name: "second", log: log.clone(), result: HookResult::Continue }));

    let api = HookApi::with_null_host();
    let outcomes = registry.dispatch(&HookEvent::AgentStart, &ctx(), &api).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(log.lock().unwrap().as_slice(), ["first", "second"]);
}

#[tokio::test]
async fn a_block_short_circuits_remaining_handlers() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let registry = HookRegistry::new();
    registry.register(
        "blocker",
        HookEventKind::ToolCall,
        Arc::new(RecordingHandler { name: "blocker", log: log.clone(), result: HookResult::Block { reason: "nope".to_string() } }),
    );
    registry.register("never-runs", HookEventKind::ToolCall, Arc::new(RecordingHandler { name: "never-runs", log: log.clone(), result: HookResult::Continue }));

    let api = HookApi::with_null_host();
    let event = HookEvent::ToolCall { call_id: "c1".to_string(), tool_name: "Bash".to_string(), input: serde_json::json!({}) };
    let outcomes = registry.dispatch(&event, &ctx(), &api).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].result.is_block());
    assert_eq!(log.lock().unwrap().as_slice(), ["blocker"]);
}

#[tokio::test]
async fn only_matching_event_kind_handlers_run() {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let registry = HookRegistry::new();
    registry.register("on-start", HookEventKind::AgentStart, Arc::new(RecordingHandler { name: "on-start", log: log.clone(), result: HookResult::Continue }));
    registry.register("on-end", HookEventKind::AgentEnd, Arc::new(RecordingHandler { name: "on-end", log: log.clone(), result: HookResult::Continue }));

    let api = HookApi::with_null_host();
    registry.dispatch(&HookEvent::AgentEnd, &ctx(), &api).await;

    assert_eq!(log.lock().unwrap().as_slice(), ["on-end"]);
}

#[tokio::test]
async fn a_timed_out_tool_call_handler_fails_closed() {
    let registry = HookRegistry::new();
    registry.register_with_timeout("slow", HookEventKind::ToolCall, Arc::new(SlowHandler), Duration::from_millis(10));

    let api = HookApi::with_null_host();
    let event = HookEvent::ToolCall { call_id: "c1".to_string(), tool_name: "Bash".to_string(), input: serde_json::json!({}) };
    let outcomes = registry.dispatch(&event, &ctx(), &api).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].result.is_block());
}

#[tokio::test]
async fn a_timed_out_non_tool_call_handler_continues() {
    let registry = HookRegistry::new();
    registry.register_with_timeout("slow", HookEventKind::AgentStart, Arc::new(SlowHandler), Duration::from_millis(10));

    let api = HookApi::with_null_host();
    let outcomes = registry.dispatch(&HookEvent::AgentStart, &ctx(), &api).await;

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0].result, HookResult::Continue));
}
