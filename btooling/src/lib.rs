//! Capability layer for discovering, executing, and authorizing remote tools.
//!
//! Tools live behind a toolkit broker reached through the proxy. The model
//! calls them by their underscore names; [`BrokerToolRuntime`] translates the
//! name, runs the call, and walks the authorization handshake when the broker
//! asks for consent.

mod args;
mod authorization;
mod broker;
mod error;
mod hooks;
mod naming;
mod runtime;
mod types;

pub mod prelude {
    pub use crate::{
        AuthorizationPolicy, AuthorizationPrompt, BrokerToolRuntime, ProxyToolBroker, ToolBroker,
        ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolName,
        ToolRuntime, ToolRuntimeHooks,
    };
}

pub use args::{parse_tool_arguments, render_tool_output};
pub use authorization::{
    AuthorizationHandshake, AuthorizationPolicy, AuthorizationPrompt, AuthorizationStatus,
    NoopAuthorizationPrompt,
};
pub use bprovider::{ToolCallRequest, ToolSpec};
pub use broker::{
    AUTHORIZE_TOOL_OPERATION, BrokerExecution, EXECUTE_TOOL_OPERATION,
    GET_FORMATTED_TOOLS_OPERATION, ProxyToolBroker, ToolBroker, WAIT_FOR_AUTH_COMPLETION_OPERATION,
};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use naming::ToolName;
pub use runtime::{AUTHORIZATION_NOT_COMPLETED, BrokerToolRuntime, ToolRuntime};
pub use types::{ToolExecutionContext, ToolExecutionResult, ToolFuture};
