//! The agent loop: PREP, STREAMING, TOOL_BATCH, and the DRAIN_STEERING /
//! DRAIN_FOLLOWUP turn boundaries that decide whether another turn starts
//! without new user input.

use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use cocode_compactor::HookDecision;
use cocode_compactor::Outcome as CompactOutcome;
use cocode_compactor::Summarizer;
use cocode_compactor::compact_branch;
use cocode_context::build_session_context;
use cocode_context::convert_to_llm;
use cocode_context::estimate_branch_tokens;
use cocode_hooks::HookApi;
use cocode_hooks::HookContext;
use cocode_hooks::HookEvent;
use cocode_hooks::HookRegistry;
use cocode_hooks::HookResult;
use cocode_protocol::AssistantMessage;
use cocode_protocol::CompactConfig;
use cocode_protocol::CompactionEntry;
use cocode_protocol::ContentBlock;
use cocode_protocol::DrainMode;
use cocode_protocol::EntryPayload;
use cocode_protocol::LoopConfig;
use cocode_protocol::LoopEvent;
use cocode_protocol::PartialAssistantMessage;
use cocode_protocol::StopReason as MessageStopReason;
use cocode_protocol::ToolCall;
use cocode_protocol::ToolResultMessage;
use cocode_protocol::UserMessage;
use cocode_session::SessionStore;
use cocode_tools::ToolExecutor;
use cocode_tools_api::ToolContextBuilder;
use cocode_tools_api::ToolRegistry;
use futures::StreamExt;
use hyper_sdk::GenerateRequest;
use hyper_sdk::HyperError;
use hyper_sdk::Provider;
use hyper_sdk::StreamEvent;
use snafu::ResultExt;
use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::LoopError;
use crate::error::Result;
use crate::fallback::FallbackConfig;
use crate::fallback::FallbackState;
use crate::host::SessionHost;
use crate::result::LoopResult;
use crate::result::StopReason;

/// Provider-backed [`Summarizer`] used for compaction: the loop has no
/// separate summarization model configured, so it re-uses the same
/// provider/model pair it drives turns with.
struct ProviderSummarizer {
    provider: Arc<dyn Provider>,
    model: String,
}

#[async_trait::async_trait]
impl Summarizer for ProviderSummarizer {
    async fn summarize(&self, prompt: &str, max_tokens: i64) -> std::result::Result<String, cocode_compactor::CompactError> {
        let request = GenerateRequest::new(vec![cocode_context::LlmMessage {
            role: cocode_context::LlmRole::User,
            content: vec![ContentBlock::Text { text: prompt.to_string() }],
        }])
        .max_tokens(max_tokens as i32);
        self.provider
            .generate(request)
            .await
            .map(|response| response.text())
            .map_err(|err| cocode_compactor::CompactError::summarize_failed(err.to_string()))
    }
}

/// Everything the agent loop needs to drive one session to completion.
pub struct AgentLoop {
    session: Arc<AsyncMutex<SessionStore>>,
    provider: Arc<dyn Provider>,
    tool_registry: Arc<ToolRegistry>,
    tool_executor: ToolExecutor,
    hooks: Arc<HookRegistry>,
    hook_api: Arc<HookApi>,
    session_host: Arc<SessionHost>,

    config: LoopConfig,
    fallback_config: FallbackConfig,
    compact_config: CompactConfig,
    context_window: i64,
    cwd: PathBuf,

    event_tx: Option<mpsc::Sender<LoopEvent>>,
    cancel_token: CancellationToken,

    turn_number: i32,
    total_input_tokens: i64,
    total_output_tokens: i64,
    fallback_state: FallbackState,

    steering_queue: VecDeque<String>,
    followup_queue: VecDeque<String>,
}

pub struct AgentLoopBuilder {
    session: Option<Arc<AsyncMutex<SessionStore>>>,
    provider: Option<Arc<dyn Provider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    hooks: Arc<HookRegistry>,
    config: LoopConfig,
    fallback_config: FallbackConfig,
    compact_config: CompactConfig,
    context_window: i64,
    cwd: PathBuf,
    model: String,
    event_tx: Option<mpsc::Sender<LoopEvent>>,
    cancel_token: CancellationToken,
}

impl AgentLoopBuilder {
    pub fn new() -> Self {
        Self {
            session: None,
            provider: None,
            tool_registry: None,
            hooks: Arc::new(HookRegistry::new()),
            config: LoopConfig::default(),
            fallback_config: FallbackConfig::default(),
            compact_config: CompactConfig::default(),
            context_window: 200_000,
            cwd: PathBuf::from("."),
            model: "unknown".to_string(),
            event_tx: None,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn session(mut self, session: Arc<AsyncMutex<SessionStore>>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    pub fn hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fallback_config(mut self, config: FallbackConfig) -> Self {
        self.fallback_config = config;
        self
    }

    pub fn compact_config(mut self, config: CompactConfig) -> Self {
        self.compact_config = config;
        self
    }

    pub fn context_window(mut self, tokens: i64) -> Self {
        self.context_window = tokens;
        self
    }

    pub fn cwd(mut self, cwd: PathBuf) -> Self {
        self.cwd = cwd;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn event_tx(mut self, tx: mpsc::Sender<LoopEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// # Panics
    /// Panics if `session`, `provider`, or `tool_registry` were never set.
    pub fn build(self) -> AgentLoop {
        let session = self.session.expect("session is required");
        let tool_registry = self.tool_registry.expect("tool_registry is required");
        let session_host = Arc::new(SessionHost::new(session.clone()));
        let hook_api = Arc::new(HookApi::new(session_host.clone()));

        AgentLoop {
            session,
            provider: self.provider.expect("provider is required"),
            tool_executor: ToolExecutor::new(tool_registry.clone(), cocode_tools::ExecutorConfig { max_concurrency: self.config.max_concurrent_tools }),
            tool_registry,
            hooks: self.hooks,
            hook_api,
            session_host,
            config: self.config,
            fallback_config: self.fallback_config,
            compact_config: self.compact_config,
            context_window: self.context_window,
            cwd: self.cwd,
            event_tx: self.event_tx,
            cancel_token: self.cancel_token,
            turn_number: 0,
            total_input_tokens: 0,
            total_output_tokens: 0,
            fallback_state: FallbackState::new(self.model),
            steering_queue: VecDeque::new(),
            followup_queue: VecDeque::new(),
        }
    }
}

impl Default for AgentLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentLoop {
    pub fn builder() -> AgentLoopBuilder {
        AgentLoopBuilder::new()
    }

    /// Queue a steering message: injected between tool-batch drains per
    /// `LoopConfig::steering_mode`.
    pub fn queue_steering(&mut self, text: impl Into<String>) {
        self.steering_queue.push_back(text.into());
    }

    /// Queue a follow-up message: drained only once the steering queue is
    /// empty and the assistant has stopped issuing tool calls.
    pub fn queue_followup(&mut self, text: impl Into<String>) {
        self.followup_queue.push_back(text.into());
    }

    pub fn abort(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn current_model(&self) -> &str {
        &self.fallback_state.current_model
    }

    /// The session store this loop drives. Exposed so a host (e.g. the
    /// control-plane command surface) can read the branch or switch leaves
    /// between `prompt()` calls without going through the loop itself.
    pub fn session(&self) -> &Arc<AsyncMutex<SessionStore>> {
        &self.session
    }

    pub fn turn_number(&self) -> i32 {
        self.turn_number
    }

    pub fn total_input_tokens(&self) -> i64 {
        self.total_input_tokens
    }

    pub fn total_output_tokens(&self) -> i64 {
        self.total_output_tokens
    }

    /// Appends a new user message and drives turns until the loop stops.
    pub async fn prompt(&mut self, user_text: impl Into<String>) -> Result<LoopResult> {
        let user_text = user_text.into();
        let before = HookEvent::BeforeAgentStart { user_text: user_text.clone() };
        let ctx = self.hook_context();
        let outcomes = self.hooks.dispatch(&before, &ctx, &self.hook_api).await;
        if let Some(reason) = blocking_reason(&outcomes) {
            return Ok(LoopResult::hook_stopped(self.turn_number, self.total_input_tokens, self.total_output_tokens, reason));
        }

        self.emit(LoopEvent::AgentStart).await;
        {
            let mut session = self.session.lock().await;
            session.append(EntryPayload::User(UserMessage::text(user_text))).context(crate::error::loop_error::SessionSnafu)?;
        }

        let result = Box::pin(self.turn_loop()).await;
        self.emit(LoopEvent::AgentEnd).await;
        result
    }

    /// Resumes driving turns without adding a new user message. Raises
    /// `LoopError::State` if the branch's last message already has role
    /// assistant (nothing to continue from).
    pub async fn continue_loop(&mut self) -> Result<LoopResult> {
        let last_is_assistant = {
            let session = self.session.lock().await;
            matches!(session.branch().last().map(|e| &e.payload), Some(EntryPayload::Assistant(_)))
        };
        if last_is_assistant {
            return crate::error::loop_error::StateSnafu { message: "continue() called but the branch already ends on an assistant message".to_string() }.fail();
        }
        self.emit(LoopEvent::AgentStart).await;
        let result = Box::pin(self.turn_loop()).await;
        self.emit(LoopEvent::AgentEnd).await;
        result
    }

    fn hook_context(&self) -> HookContext {
        HookContext::new("session", self.cwd.clone())
    }

    async fn emit(&self, event: LoopEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// One PREP → STREAMING → TOOL_BATCH pass, recursing into the next
    /// turn when the assistant issued tool calls or a steering/follow-up
    /// message is queued, and returning otherwise.
    async fn turn_loop(&mut self) -> Result<LoopResult> {
        if self.cancel_token.is_cancelled() {
            return Ok(LoopResult::interrupted(self.turn_number, self.total_input_tokens, self.total_output_tokens));
        }
        if let Some(max) = self.config.max_turns
            && self.turn_number >= max
        {
            self.emit(LoopEvent::TurnEnd { turn_id: String::new() }).await;
            return Ok(LoopResult::max_turns_reached(self.turn_number, self.total_input_tokens, self.total_output_tokens));
        }

        // ── PREP ──
        self.maybe_compact().await?;

        let branch = { self.session.lock().await.branch() };
        let view = build_session_context(&branch);
        let ctx_event = HookEvent::Context { message_count: view.len() };
        let hook_ctx = self.hook_context();
        let context_outcomes = self.hooks.dispatch(&ctx_event, &hook_ctx, &self.hook_api).await;
        if let Some(reason) = blocking_reason(&context_outcomes) {
            return Ok(LoopResult::hook_stopped(self.turn_number, self.total_input_tokens, self.total_output_tokens, reason));
        }
        let messages = convert_to_llm(&view);

        self.turn_number += 1;
        let turn_id = uuid::Uuid::new_v4().to_string();
        self.emit(LoopEvent::TurnStart { turn_id: turn_id.clone(), turn_number: self.turn_number }).await;
        self.hooks.dispatch(&HookEvent::TurnStart { turn_id: turn_id.clone() }, &hook_ctx, &self.hook_api).await;

        // ── STREAMING ──
        let assistant_message = self.stream_turn(&turn_id, messages).await?;
        {
            let mut session = self.session.lock().await;
            session.append(EntryPayload::Assistant(assistant_message.clone())).context(crate::error::loop_error::SessionSnafu)?;
        }
        self.total_input_tokens += assistant_message.usage.input;
        self.total_output_tokens += assistant_message.usage.output;

        if assistant_message.stop_reason == MessageStopReason::Aborted {
            self.emit(LoopEvent::TurnEnd { turn_id }).await;
            return Ok(LoopResult::interrupted(self.turn_number, self.total_input_tokens, self.total_output_tokens));
        }

        let tool_calls = assistant_message.tool_calls();
        if tool_calls.is_empty() {
            self.emit(LoopEvent::TurnEnd { turn_id }).await;
            if let Some(result) = self.drain_queues_or_stop(&assistant_message).await? {
                return Ok(result);
            }
            return Box::pin(self.turn_loop()).await;
        }

        // ── TOOL_BATCH ──
        let calls: Vec<ToolCall> = tool_calls.into_iter().cloned().collect();
        self.run_tool_batch(&turn_id, &assistant_message, &calls).await?;
        self.emit(LoopEvent::TurnEnd { turn_id }).await;

        if self.cancel_token.is_cancelled() {
            return Ok(LoopResult::interrupted(self.turn_number, self.total_input_tokens, self.total_output_tokens));
        }
        if let Some(result) = self.drain_queues_or_stop(&assistant_message).await? {
            return Ok(result);
        }
        Box::pin(self.turn_loop()).await
    }

    /// DRAIN_STEERING / DRAIN_FOLLOWUP: returns `Some(result)` when the
    /// loop should stop here, `None` when it should start another turn
    /// (either because a message was drained, or because the assistant
    /// still has pending tool calls to answer).
    async fn drain_queues_or_stop(&mut self, assistant_message: &AssistantMessage) -> Result<Option<LoopResult>> {
        if let Some(text) = drain(&mut self.steering_queue, self.config.steering_mode) {
            self.session.lock().await.append(EntryPayload::User(UserMessage::text(text))).context(crate::error::loop_error::SessionSnafu)?;
            return Ok(None);
        }
        if self.session_host.take_pending_trigger() {
            return Ok(None);
        }
        if !assistant_message.tool_calls().is_empty() {
            return Ok(None);
        }
        if let Some(text) = drain(&mut self.followup_queue, self.config.follow_up_mode) {
            self.session.lock().await.append(EntryPayload::User(UserMessage::text(text))).context(crate::error::loop_error::SessionSnafu)?;
            return Ok(None);
        }
        Ok(Some(LoopResult::completed(
            self.turn_number,
            self.total_input_tokens,
            self.total_output_tokens,
            assistant_message.content.iter().filter_map(|b| match b { ContentBlock::Text { text } => Some(text.as_str()), _ => None }).collect(),
            assistant_message.content.clone(),
        )))
    }

    /// Runs the compactor unconditionally, bypassing
    /// `CompactConfig::should_trigger`. Used by the `compact` control-plane
    /// command; the turn loop itself always goes through [`Self::maybe_compact`].
    pub async fn compact_now(&mut self) -> Result<()> {
        self.run_compaction(true).await
    }

    async fn maybe_compact(&mut self) -> Result<()> {
        self.run_compaction(false).await
    }

    async fn run_compaction(&mut self, force: bool) -> Result<()> {
        let branch = { self.session.lock().await.branch() };
        if branch.is_empty() {
            return Ok(());
        }
        let budget = estimate_branch_tokens(&branch, self.compact_config.image_token_estimate, 0);
        let tokens_before = budget.total();
        if !force && !self.compact_config.should_trigger(tokens_before, self.context_window) {
            return Ok(());
        }

        let hook_ctx = self.hook_context();
        let event = HookEvent::SessionBeforeCompact { tokens_before };
        let outcomes = self.hooks.dispatch(&event, &hook_ctx, &self.hook_api).await;
        let decision = resolve_compaction_decision(&outcomes);

        self.emit(LoopEvent::CompactionStarted).await;
        let summarizer = ProviderSummarizer { provider: self.provider.clone(), model: self.fallback_state.current_model.clone() };
        let outcome = compact_branch(
            &summarizer,
            &branch,
            self.compact_config.keep_recent_tokens,
            self.compact_config.image_token_estimate,
            self.compact_config.summary_max_tokens(),
            tokens_before,
            decision,
        )
        .await;

        match outcome {
            CompactOutcome::Entry(entry) => {
                let summary_tokens = entry.summary.len() as i64 / 4;
                self.session.lock().await.append(EntryPayload::Compaction(entry)).context(crate::error::loop_error::SessionSnafu)?;
                self.emit(LoopEvent::CompactionCompleted { summary_tokens, tokens_before }).await;
            }
            CompactOutcome::Cancelled => {
                self.emit(LoopEvent::CompactionCancelled).await;
            }
            CompactOutcome::Failed(reason) => {
                warn!(reason = %reason, "compaction failed, proceeding uncompacted");
                self.emit(LoopEvent::CompactionFailed { reason }).await;
            }
        }
        Ok(())
    }

    async fn stream_turn(&mut self, turn_id: &str, messages: Vec<cocode_context::LlmMessage>) -> Result<AssistantMessage> {
        let mut attempt = 0i32;
        loop {
            if self.cancel_token.is_cancelled() {
                return Ok(aborted_message());
            }

            let request = GenerateRequest::new(messages.clone()).tools(self.tool_registry.all_definitions());
            self.emit(LoopEvent::MessageStart { turn_id: turn_id.to_string() }).await;
            match self.run_stream_once(turn_id, request).await {
                Ok(message) => return Ok(message),
                Err(err) if !err.is_retryable() => return Err(err).context(crate::error::loop_error::ProviderSnafu),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.config.retry.max_retries {
                        if self.fallback_state.should_fallback(&self.fallback_config)
                            && let Some(next_model) = self.fallback_state.next_model(&self.fallback_config)
                        {
                            let from = self.fallback_state.current_model.clone();
                            self.fallback_state.record_fallback(next_model.clone(), err.to_string());
                            self.emit(LoopEvent::ModelFallbackStarted { from, to: next_model, reason: err.to_string() }).await;
                            attempt = 0;
                            continue;
                        }
                        return Err(err).context(crate::error::loop_error::ProviderSnafu);
                    }
                    self.emit(LoopEvent::AutoRetryStart { attempt, max_attempts: self.config.retry.max_retries }).await;
                    let delay = self.config.retry.base_delay_ms * attempt as u64;
                    tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                    self.emit(LoopEvent::AutoRetryEnd { attempt, succeeded: false }).await;
                }
            }
        }
    }

    /// Assembles one `AssistantMessage` from a provider's event stream.
    /// Every content block kind reports its final value on its own `*End`
    /// event, so the assembler only needs deltas for live rendering.
    async fn run_stream_once(&mut self, turn_id: &str, request: GenerateRequest) -> std::result::Result<AssistantMessage, HyperError> {
        let mut stream = self.provider.stream(request).await?;
        let mut blocks: BTreeMap<i64, ContentBlock> = BTreeMap::new();
        let mut partial = PartialAssistantMessage::default();
        let mut usage = cocode_protocol::TokenUsage::zero();
        let mut stop_reason = MessageStopReason::Stop;

        while let Some(event) = stream.next().await {
            if self.cancel_token.is_cancelled() {
                return Ok(aborted_message());
            }
            let event = event?;
            match event {
                StreamEvent::TextStart { .. } | StreamEvent::ThinkingStart { .. } | StreamEvent::ToolCallStart { .. } | StreamEvent::ToolCallDelta { .. } => {}
                StreamEvent::TextDelta { delta, .. } => {
                    partial.content.push(ContentBlock::Text { text: delta });
                    self.emit(LoopEvent::MessageUpdate { turn_id: turn_id.to_string(), partial: partial.clone() }).await;
                }
                StreamEvent::ThinkingDelta { delta, .. } => {
                    partial.content.push(ContentBlock::Thinking { text: delta });
                    self.emit(LoopEvent::MessageUpdate { turn_id: turn_id.to_string(), partial: partial.clone() }).await;
                }
                StreamEvent::TextEnd { index, text } => {
                    blocks.insert(index, ContentBlock::Text { text });
                }
                StreamEvent::ThinkingEnd { index, text } => {
                    blocks.insert(index, ContentBlock::Thinking { text });
                }
                StreamEvent::ToolCallEnd { index, tool_call } => {
                    blocks.insert(index, ContentBlock::ToolCall(tool_call));
                }
                StreamEvent::Done { stop_reason: sr, usage: u } => {
                    stop_reason = sr;
                    usage = u;
                    break;
                }
                StreamEvent::Error { message, retryable } => {
                    return Err(if retryable { HyperError::NetworkError(message) } else { HyperError::Internal(message) });
                }
            }
        }

        let content: Vec<ContentBlock> = blocks.into_values().collect();
        let message = AssistantMessage { content: content.clone(), usage, stop_reason, error_message: None };
        self.emit(LoopEvent::MessageEnd { turn_id: turn_id.to_string(), message: message.clone() }).await;
        Ok(message)
    }

    async fn run_tool_batch(&mut self, turn_id: &str, assistant_entry: &AssistantMessage, calls: &[ToolCall]) -> Result<()> {
        let _ = assistant_entry;
        let hook_ctx = self.hook_context();
        let mut blocked: Vec<(String, String)> = Vec::new();
        let mut runnable: Vec<ToolCall> = Vec::new();

        for call in calls {
            let event = HookEvent::ToolCall { call_id: call.id.clone(), tool_name: call.name.clone(), input: call.arguments.clone() };
            let outcomes = self.hooks.dispatch(&event, &hook_ctx, &self.hook_api).await;
            if let Some(reason) = blocking_reason(&outcomes) {
                blocked.push((call.id.clone(), reason));
            } else {
                self.emit(LoopEvent::ToolCall { turn_id: turn_id.to_string(), call_id: call.id.clone(), name: call.name.clone(), input: call.arguments.clone() }).await;
                self.emit(LoopEvent::ToolExecutionStart { call_id: call.id.clone(), name: call.name.clone() }).await;
                runnable.push(call.clone());
            }
        }

        let session_id = { self.session.lock().await.current_leaf().to_string() };
        let cwd = self.cwd.clone();
        let cancel_token = self.cancel_token.clone();
        let interrupt_mode = self.config.interrupt_mode;
        let outcomes = self
            .tool_executor
            .execute_batch(
                &runnable,
                |call| ToolContextBuilder::new(call.id.clone(), session_id.clone(), cwd.clone()).cancel_token(cancel_token.clone()).build(),
                || interrupt_mode == cocode_protocol::InterruptMode::Immediate && !self.steering_queue.is_empty(),
            )
            .await;

        let mut session = self.session.lock().await;
        let assistant_entry_id = session.current_leaf();

        for (call_id, reason) in blocked {
            let message = ToolResultMessage { tool_call_id: call_id.clone(), content: cocode_protocol::ToolResultContent::Text(format!("blocked by hook: {reason}")), is_error: true, details: None };
            session.append(EntryPayload::ToolResult(message)).context(crate::error::loop_error::SessionSnafu)?;
            self.emit(LoopEvent::ToolResult { turn_id: turn_id.to_string(), call_id, is_error: true }).await;
        }

        for outcome in outcomes {
            if let Some(args) = outcome.canonical_args.clone() {
                let _ = session.rewrite_assistant_tool_call_args(assistant_entry_id, &outcome.call_id, args);
            }
            let tool_name = calls.iter().find(|c| c.id == outcome.call_id).map(|c| c.name.clone()).unwrap_or_default();
            let result_event = HookEvent::ToolResult { call_id: outcome.call_id.clone(), tool_name, content: serde_json::to_value(&outcome.output.content).unwrap_or(serde_json::Value::Null), is_error: outcome.output.is_error };
            let result_outcomes = self.hooks.dispatch(&result_event, &hook_ctx, &self.hook_api).await;
            let (content, is_error) = apply_tool_result_override(&outcome.output, &result_outcomes);

            self.emit(LoopEvent::ToolExecutionEnd { call_id: outcome.call_id.clone(), is_error }).await;
            let message = ToolResultMessage { tool_call_id: outcome.call_id.clone(), content, is_error, details: None };
            session.append(EntryPayload::ToolResult(message)).context(crate::error::loop_error::SessionSnafu)?;
            self.emit(LoopEvent::ToolResult { turn_id: turn_id.to_string(), call_id: outcome.call_id, is_error }).await;
        }
        Ok(())
    }

}

fn aborted_message() -> AssistantMessage {
    AssistantMessage { content: vec![], usage: cocode_protocol::TokenUsage::zero(), stop_reason: MessageStopReason::Aborted, error_message: None }
}

fn drain(queue: &mut VecDeque<String>, mode: DrainMode) -> Option<String> {
    if queue.is_empty() {
        return None;
    }
    match mode {
        DrainMode::OneAtATime => queue.pop_front(),
        DrainMode::All => Some(queue.drain(..).collect::<Vec<_>>().join("\n\n")),
    }
}

fn blocking_reason(outcomes: &[cocode_hooks::HookOutcome]) -> Option<String> {
    outcomes.iter().find_map(|o| match &o.result {
        HookResult::Block { reason } => Some(reason.clone()),
        HookResult::Cancel => Some("cancelled by hook".to_string()),
        _ => None,
    })
}

fn resolve_compaction_decision(outcomes: &[cocode_hooks::HookOutcome]) -> HookDecision {
    for outcome in outcomes {
        match &outcome.result {
            HookResult::Block { .. } | HookResult::Cancel => return HookDecision::Cancelled,
            HookResult::OverrideCompaction { compaction } => {
                if let Ok(entry) = serde_json::from_value::<CompactionEntry>(compaction.clone()) {
                    return HookDecision::Override(entry);
                }
            }
            _ => {}
        }
    }
    HookDecision::Proceed
}

fn apply_tool_result_override(output: &cocode_protocol::ToolOutput, outcomes: &[cocode_hooks::HookOutcome]) -> (cocode_protocol::ToolResultContent, bool) {
    for outcome in outcomes {
        if let HookResult::ReplaceToolResult { content, is_error, .. } = &outcome.result {
            return (cocode_protocol::ToolResultContent::Structured(content.clone()), *is_error);
        }
    }
    (output.content.clone(), output.is_error)
}

#[cfg(test)]
#[path = "driver.test.rs"]
mod tests;
