//! Typed hook event bus with veto/modify semantics.
//!
//! Every lifecycle point the agent loop passes through dispatches a typed
//! `cocode_protocol::HookEvent` through a `HookRegistry`. Handlers run
//! sequentially in registration order and can block, cancel, or rewrite
//! the in-flight operation; `HookApi` is the capability handle handlers
//! use to push state back into the session (`sendMessage`/`appendEntry`)
//! or register slash commands and renderers.

mod api;
mod context;
mod error;
mod registry;
mod result;

pub use api::CommandHandler;
pub use api::HookApi;
pub use api::HookHost;
pub use api::MessageRenderer;
pub use api::NullHost;
pub use context::HookContext;
pub use error::HookError;
pub use error::Result;
pub use registry::HookHandler;
pub use registry::HookRegistry;
pub use result::HookOutcome;
pub use result::HookResult;

pub use cocode_protocol::HookEvent;
pub use cocode_protocol::HookEventKind;
