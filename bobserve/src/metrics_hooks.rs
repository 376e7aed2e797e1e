//! Metrics-based hooks for gateway calls and the tool runtime.
//!
//! ```rust
//! use bobserve::MetricsObservabilityHooks;
//! use bprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use bprovider::{ProviderError, ProviderOperationHooks, ProxyService, ToolCallRequest};
use btooling::{
    AuthorizationHandshake, ToolError, ToolExecutionContext, ToolExecutionResult,
    ToolRuntimeHooks,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_call_start(&self, service: ProxyService, operation: &str) {
        metrics::counter!(
            "bridgekit_proxy_call_start_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_call_success(&self, service: ProxyService, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "bridgekit_proxy_success_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "bridgekit_proxy_call_duration_seconds",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_call_failure(
        &self,
        service: ProxyService,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "bridgekit_proxy_failure_total",
            "service" => service.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "bridgekit_proxy_call_duration_seconds",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_envelope_rejected(&self, service: ProxyService, operation: &str, _message: &str) {
        metrics::counter!(
            "bridgekit_proxy_envelope_rejected_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCallRequest, _context: &ToolExecutionContext) {
        metrics::counter!(
            "bridgekit_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "bridgekit_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "bridgekit_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "bridgekit_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "bridgekit_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_authorization_required(
        &self,
        tool_call: &ToolCallRequest,
        handshake: &AuthorizationHandshake,
    ) {
        metrics::counter!(
            "bridgekit_tool_authorization_required_total",
            "tool_name" => tool_call.name.clone(),
            "already_completed" => handshake.status.is_completed().to_string()
        )
        .increment(1);
    }

    fn on_toolkit_discovery_failed(&self, toolkit: &str, _error: &ToolError) {
        metrics::counter!(
            "bridgekit_toolkit_discovery_failure_total",
            "toolkit" => toolkit.to_string()
        )
        .increment(1);
    }
}
