//! Tracing-based hooks for gateway calls and the tool runtime.
//!
//! The same type doubles as an [`AuthorizationPrompt`] that logs the URL the
//! user has to visit.
//!
//! ```rust
//! use bobserve::TracingObservabilityHooks;
//! use btooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use bprovider::{ProviderError, ProviderOperationHooks, ProxyService, ToolCallRequest};
use btooling::{
    AuthorizationHandshake, AuthorizationPrompt, ToolError, ToolExecutionContext,
    ToolExecutionResult, ToolRuntimeHooks,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

fn session_of(context: &ToolExecutionContext) -> Option<&str> {
    context.session_id.as_ref().map(|id| id.as_str())
}

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_call_start(&self, service: ProxyService, operation: &str) {
        tracing::debug!(
            phase = "proxy",
            event = "call_start",
            service = %service,
            operation
        );
    }

    fn on_call_success(&self, service: ProxyService, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "proxy",
            event = "call_success",
            service = %service,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_call_failure(
        &self,
        service: ProxyService,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "proxy",
            event = "call_failure",
            service = %service,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_envelope_rejected(&self, service: ProxyService, operation: &str, message: &str) {
        tracing::warn!(
            phase = "proxy",
            event = "envelope_rejected",
            service = %service,
            operation,
            message
        );
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCallRequest, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = tool_call.call_id,
            session_id = session_of(context)
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCallRequest,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = tool_call.call_id,
            session_id = session_of(context),
            output_bytes = result.output.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCallRequest,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = tool_call.call_id,
            session_id = session_of(context),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_authorization_required(
        &self,
        tool_call: &ToolCallRequest,
        handshake: &AuthorizationHandshake,
    ) {
        tracing::warn!(
            phase = "tool",
            event = "authorization_required",
            tool_name = tool_call.name,
            tool_call_id = tool_call.call_id,
            auth_id = handshake.id,
            auth_status = ?handshake.status
        );
    }

    fn on_toolkit_discovery_failed(&self, toolkit: &str, error: &ToolError) {
        tracing::warn!(
            phase = "tool",
            event = "discovery_failed",
            toolkit,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl AuthorizationPrompt for TracingObservabilityHooks {
    fn present(&self, tool_name: &str, url: &str) {
        tracing::warn!(
            phase = "tool",
            event = "authorization_prompt",
            tool_name,
            url,
            "authorization required for {tool_name}, visit {url}"
        );
    }
}
