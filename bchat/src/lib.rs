//! Conversational orchestration over the completion service and remote tools.

mod error;
mod orchestrator;
pub mod prompts;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        AskRequest, ChatError, ChatErrorKind, ChatErrorPhase, ChatPolicy, ChatReply, ChatService,
        ChatServiceBuilder, ChatSession, ChatTurnRequest, ImageAnalysisRequest,
        InMemorySessionStore, JsonRequest, SessionStore, WebSearchRequest,
    };
    pub use bcommon::SessionId;
    pub use bprovider::{ChatMessage, Role};
    pub use btooling::{
        AuthorizationPolicy, AuthorizationPrompt, BrokerToolRuntime, ToolError, ToolErrorKind,
        ToolRuntime,
    };
}

pub use error::{ChatError, ChatErrorKind, ChatErrorPhase};
pub use orchestrator::ToolOrchestrator;
pub use service::{ChatPolicy, ChatService, ChatServiceBuilder, DEFAULT_MODEL};
pub use store::{ChatFuture, InMemorySessionStore, SessionStore};
pub use types::{
    AskRequest, ChatReply, ChatSession, ChatTurnRequest, ImageAnalysisRequest, JsonRequest,
    WebSearchRequest,
};
pub use bcommon::SessionId;
