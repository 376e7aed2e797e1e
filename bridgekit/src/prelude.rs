//! Common imports for most bridgekit applications.

pub use crate::{
    ask, ask_with_tools, assistant_message, build_runtime, build_runtime_with,
    build_runtime_with_transport, json_request, system_message, tool_turn, turn, user_message,
    web_search,
};
pub use crate::{bk_messages, bk_msg, bk_turn};
pub use crate::{
    AskRequest, AuthorizationPolicy, AuthorizationPrompt, BoxFuture, BridgeConfig, BridgeRuntime,
    ChatError, ChatErrorKind, ChatErrorPhase, ChatMessage, ChatPolicy, ChatReply, ChatService,
    ChatTurnRequest, ImageAnalysisRequest, InMemorySessionStore, JsonRequest, ProviderError,
    ProxyTransport, Role, RuntimeParts, SessionId, SessionStore, ToolError, ToolRuntime,
    WebSearchRequest,
};
