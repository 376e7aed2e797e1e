//! Completion-service access through the intermediating proxy.
//!
//! Requests are formatted here, sent as `{service, operation, payload}` envelopes
//! through a [`ProxyTransport`], and decoded into a closed set of typed results
//! that [`interpret`] turns into text, JSON, or a [`ProviderError`].
//!
//! ```rust
//! use bprovider::{ResponsesObject, interpret};
//!
//! let response = ResponsesObject::output_text("resp_1", r#"{"ok":true}"#);
//! let json = interpret::extract_json(&response).expect("output should be json");
//! assert_eq!(json["ok"], true);
//! ```

mod client;
mod error;
mod hooks;
pub mod interpret;
mod proxy;
mod request;
mod response;
mod secret;
mod serde_api;
#[cfg(feature = "http-transport")]
mod transport;

pub mod prelude;

pub use client::{
    CHAT_COMPLETION_OPERATION, CompletionClient, ProxyGateway, RESPONSES_CREATE_OPERATION,
};
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks};
pub use proxy::{ProviderFuture, ProxyEnvelope, ProxyRequest, ProxyService, ProxyTransport};
pub use request::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatMessage, CompletionMessage,
    HostedTool, InputContent, InputMessage, ResponseFormat, ResponsesInput, ResponsesRequest,
    Role, ToolCallRequest, ToolSpec,
};
pub use response::{
    Annotation, AssistantMessage, ChatCompletion, CompletionPayload, ContentBlock, OutputItem,
    ResponseStatus, ResponsesObject, UrlCitation,
};
pub use secret::SecretString;
#[cfg(feature = "http-transport")]
pub use transport::{DEFAULT_PROXY_URL, ProxyHttpTransport};
