//! Toolkit broker contract and its proxy-backed implementation.

use bprovider::{ProxyGateway, ProxyService, ToolSpec};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AuthorizationHandshake, AuthorizationStatus, ToolError, ToolFuture, render_tool_output};

pub const GET_FORMATTED_TOOLS_OPERATION: &str = "get_formatted_tools";
pub const EXECUTE_TOOL_OPERATION: &str = "execute_tool";
pub const AUTHORIZE_TOOL_OPERATION: &str = "authorize_tool";
pub const WAIT_FOR_AUTH_COMPLETION_OPERATION: &str = "wait_for_auth_completion";

const AUTH_REQUIRED_MARKER: &str = "auth_required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerExecution {
    /// Rendered tool output, ready to be recorded as a tool message.
    Output(String),
    AuthorizationRequired,
}

/// Remote toolkit registry and executor. Tool names use the broker's dotted form.
pub trait ToolBroker: Send + Sync {
    fn formatted_tools<'a>(&'a self, toolkit: &'a str)
    -> ToolFuture<'a, Result<Vec<ToolSpec>, ToolError>>;

    fn execute_tool<'a>(
        &'a self,
        tool_name: &'a str,
        input: Value,
    ) -> ToolFuture<'a, Result<BrokerExecution, ToolError>>;

    fn authorize_tool<'a>(
        &'a self,
        tool_name: &'a str,
    ) -> ToolFuture<'a, Result<AuthorizationHandshake, ToolError>>;

    fn wait_for_auth_completion<'a>(
        &'a self,
        auth_id: &'a str,
    ) -> ToolFuture<'a, Result<AuthorizationStatus, ToolError>>;
}

#[derive(Debug, Clone)]
pub struct ProxyToolBroker {
    gateway: ProxyGateway,
}

impl ProxyToolBroker {
    pub fn new(gateway: ProxyGateway) -> Self {
        Self { gateway }
    }
}

impl ToolBroker for ProxyToolBroker {
    fn formatted_tools<'a>(
        &'a self,
        toolkit: &'a str,
    ) -> ToolFuture<'a, Result<Vec<ToolSpec>, ToolError>> {
        Box::pin(async move {
            let data = self
                .gateway
                .call(
                    ProxyService::Arcade,
                    GET_FORMATTED_TOOLS_OPERATION,
                    json!({"format": "openai", "toolkit": toolkit}),
                )
                .await
                .map_err(|err| ToolError::discovery(err.message))?;

            let Value::Array(items) = data else {
                return Err(ToolError::discovery(format!(
                    "toolkit '{toolkit}' did not return a tool list"
                )));
            };

            items
                .into_iter()
                .map(|item| {
                    ToolSpec::from_openai_value(item).map_err(|err| ToolError::discovery(err.message))
                })
                .collect()
        })
    }

    fn execute_tool<'a>(
        &'a self,
        tool_name: &'a str,
        input: Value,
    ) -> ToolFuture<'a, Result<BrokerExecution, ToolError>> {
        Box::pin(async move {
            let envelope = self
                .gateway
                .call_envelope(
                    ProxyService::Arcade,
                    EXECUTE_TOOL_OPERATION,
                    json!({"tool_name": tool_name, "input": input}),
                )
                .await?;

            if envelope.success {
                let data = envelope.data.unwrap_or(Value::Null);
                return Ok(BrokerExecution::Output(render_tool_output(&data)));
            }

            let marker = envelope
                .data
                .as_ref()
                .and_then(|data| data.get("type"))
                .and_then(Value::as_str);
            if marker == Some(AUTH_REQUIRED_MARKER) {
                return Ok(BrokerExecution::AuthorizationRequired);
            }

            Err(ToolError::execution(
                envelope
                    .failure_message()
                    .unwrap_or_else(|| format!("tool '{tool_name}' failed")),
            ))
        })
    }

    fn authorize_tool<'a>(
        &'a self,
        tool_name: &'a str,
    ) -> ToolFuture<'a, Result<AuthorizationHandshake, ToolError>> {
        Box::pin(async move {
            let data = self
                .gateway
                .call(
                    ProxyService::Arcade,
                    AUTHORIZE_TOOL_OPERATION,
                    json!({"tool_name": tool_name}),
                )
                .await?;

            AuthorizationHandshake::from_value(data)
        })
    }

    fn wait_for_auth_completion<'a>(
        &'a self,
        auth_id: &'a str,
    ) -> ToolFuture<'a, Result<AuthorizationStatus, ToolError>> {
        Box::pin(async move {
            let data = self
                .gateway
                .call(
                    ProxyService::Arcade,
                    WAIT_FOR_AUTH_COMPLETION_OPERATION,
                    json!({"auth_id": auth_id}),
                )
                .await?;

            let parsed: ApiCompletionStatus = serde_json::from_value(data).map_err(|err| {
                ToolError::execution(format!("unexpected authorization status: {err}"))
            })?;

            Ok(parsed
                .status
                .as_deref()
                .map(AuthorizationStatus::parse)
                .unwrap_or_else(|| AuthorizationStatus::Other("missing".to_string())))
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiCompletionStatus {
    #[serde(default)]
    status: Option<String>,
}
