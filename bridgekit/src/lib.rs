//! Unified facade over the bridgekit workspace crates.
//!
//! Most applications need only this crate: it re-exports the chat, provider,
//! tooling, and observability crates, reads [`BridgeConfig`], and wires a
//! [`BridgeRuntime`] whose [`ChatService`] answers `ask`, `chat`, and the
//! structured-output operations through the proxy.
//!
//! ```rust,no_run
//! use bridgekit::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = build_runtime(BridgeConfig::from_env()?)?;
//! let reply = runtime.chat.chat(bk_turn!("", "Hello!")).await?;
//! println!("{} ({})", reply.text, reply.session_id);
//! # Ok(())
//! # }
//! ```

mod config;
mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use bchat;
pub use bcommon;
pub use bobserve;
pub use bprovider;
pub use btooling;

pub use bchat::{
    AskRequest, ChatError, ChatErrorKind, ChatErrorPhase, ChatPolicy, ChatReply, ChatService,
    ChatServiceBuilder, ChatSession, ChatTurnRequest, DEFAULT_MODEL, ImageAnalysisRequest,
    InMemorySessionStore, JsonRequest, SessionStore, WebSearchRequest,
};
pub use bcommon::{BoxFuture, SessionId};
pub use bobserve::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeToolHooks, TracingObservabilityHooks,
};
pub use bprovider::{
    ChatMessage, CompletionClient, DEFAULT_PROXY_URL, NoopOperationHooks, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderOperationHooks, ProxyEnvelope, ProxyGateway,
    ProxyHttpTransport, ProxyRequest, ProxyService, ProxyTransport, Role,
    SecretString,
};
pub use btooling::{
    AuthorizationPolicy, AuthorizationPrompt, BrokerToolRuntime, NoopToolRuntimeHooks,
    ProxyToolBroker, ToolBroker, ToolError, ToolErrorKind, ToolExecutionContext, ToolName,
    ToolRuntime, ToolRuntimeHooks,
};

pub use config::{BridgeConfig, MODEL_ENV, PROXY_TOKEN_ENV, PROXY_URL_ENV, TIMEOUT_SECS_ENV};
pub use runtime::{
    BridgeRuntime, RuntimeParts, build_runtime, build_runtime_with, build_runtime_with_transport,
    proxy_transport,
};
pub use util::{
    ask, ask_with_tools, assistant_message, json_request, system_message, tool_turn, turn,
    user_message, web_search,
};
