//! Common `bprovider` imports for downstream crates.

pub use crate::{
    ChatCompletion, ChatCompletionRequest, ChatMessage, CompletionClient, CompletionMessage,
    NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderOperationHooks, ProxyGateway,
    ProxyService, ProxyTransport, ResponsesObject, ResponsesRequest, Role,
    ToolCallRequest, ToolSpec, UrlCitation,
};
pub use bcommon::BoxFuture;
