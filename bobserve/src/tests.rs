use std::sync::{Arc, Mutex};
use std::time::Duration;

use bprovider::{
    ProviderError, ProviderFuture, ProviderOperationHooks, ProxyEnvelope, ProxyGateway,
    ProxyRequest, ProxyService, ProxyTransport, ToolCallRequest,
};
use btooling::{
    AuthorizationHandshake, AuthorizationPrompt, AuthorizationStatus, ToolError,
    ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks,
};
use serde_json::json;

use crate::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeToolHooks, TracingObservabilityHooks,
};

fn sample_tool_call() -> ToolCallRequest {
    ToolCallRequest::new("call-1", "Math_Sqrt", "{\"a\":16}")
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::for_session("session-1").with_toolkits(["Math"])
}

fn sample_handshake() -> AuthorizationHandshake {
    AuthorizationHandshake::new(
        AuthorizationStatus::Pending,
        Some("https://auth.example/math".to_string()),
        "auth-1",
    )
}

fn drive_provider_hooks(hooks: &dyn ProviderOperationHooks) {
    let provider_error = ProviderError::timeout("proxy timeout");

    hooks.on_call_start(ProxyService::OpenAi, "chat_completion");
    hooks.on_call_success(
        ProxyService::OpenAi,
        "chat_completion",
        Duration::from_millis(10),
    );
    hooks.on_call_failure(
        ProxyService::Arcade,
        "execute_tool",
        Duration::from_millis(10),
        &provider_error,
    );
    hooks.on_envelope_rejected(ProxyService::Arcade, "authorize_tool", "unknown tool");
}

fn drive_tool_hooks(hooks: &dyn ToolRuntimeHooks) {
    let tool_error = ToolError::execution("tool failed");

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", "4"),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &ToolExecutionContext::new(),
        &tool_error,
        Duration::from_millis(20),
    );
    hooks.on_authorization_required(&sample_tool_call(), &sample_handshake());
    hooks.on_toolkit_discovery_failed("Broken", &ToolError::discovery("unknown toolkit"));
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingObservabilityHooks;
    drive_provider_hooks(&hooks);
    drive_tool_hooks(&hooks);
    hooks.present("Math.Sqrt", "https://auth.example/math");
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsObservabilityHooks;
    drive_provider_hooks(&hooks);
    drive_tool_hooks(&hooks);
}

#[derive(Default, Clone)]
struct RecordingProviderHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ProviderOperationHooks for RecordingProviderHooks {
    fn on_call_start(&self, _service: ProxyService, _operation: &str) {
        self.events.lock().expect("events lock").push("start");
    }

    fn on_call_success(&self, _service: ProxyService, _operation: &str, _elapsed: Duration) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_call_failure(
        &self,
        _service: ProxyService,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }

    fn on_envelope_rejected(&self, _service: ProxyService, _operation: &str, _message: &str) {
        self.events.lock().expect("events lock").push("rejected");
    }
}

#[derive(Default, Clone)]
struct RecordingToolHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ToolRuntimeHooks for RecordingToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCallRequest, _context: &ToolExecutionContext) {
        self.events.lock().expect("events lock").push("start");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }

    fn on_authorization_required(
        &self,
        _tool_call: &ToolCallRequest,
        _handshake: &AuthorizationHandshake,
    ) {
        self.events.lock().expect("events lock").push("authorization");
    }

    fn on_toolkit_discovery_failed(&self, _toolkit: &str, _error: &ToolError) {
        self.events.lock().expect("events lock").push("discovery");
    }
}

struct PanicProviderHooks;

impl ProviderOperationHooks for PanicProviderHooks {
    fn on_call_start(&self, _service: ProxyService, _operation: &str) {
        panic!("call_start panic");
    }

    fn on_call_success(&self, _service: ProxyService, _operation: &str, _elapsed: Duration) {
        panic!("success panic");
    }

    fn on_call_failure(
        &self,
        _service: ProxyService,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        panic!("failure panic");
    }

    fn on_envelope_rejected(&self, _service: ProxyService, _operation: &str, _message: &str) {
        panic!("rejected panic");
    }
}

struct PanicToolHooks;

impl ToolRuntimeHooks for PanicToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCallRequest, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }

    fn on_authorization_required(
        &self,
        _tool_call: &ToolCallRequest,
        _handshake: &AuthorizationHandshake,
    ) {
        panic!("authorization panic");
    }

    fn on_toolkit_discovery_failed(&self, _toolkit: &str, _error: &ToolError) {
        panic!("discovery panic");
    }
}

#[test]
fn safe_provider_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingProviderHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeProviderHooks::new(inner);

    drive_provider_hooks(&hooks);

    assert_eq!(
        events.lock().expect("events lock").as_slice(),
        ["start", "success", "failure", "rejected"]
    );
}

#[test]
fn safe_tool_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingToolHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeToolHooks::new(inner);

    drive_tool_hooks(&hooks);

    assert_eq!(
        events.lock().expect("events lock").as_slice(),
        ["start", "success", "failure", "authorization", "discovery"]
    );
}

#[test]
fn safe_provider_hooks_swallow_panics() {
    drive_provider_hooks(&SafeProviderHooks::new(PanicProviderHooks));
}

#[test]
fn safe_tool_hooks_swallow_panics() {
    drive_tool_hooks(&SafeToolHooks::new(PanicToolHooks));
}

#[derive(Debug)]
struct OkTransport;

impl ProxyTransport for OkTransport {
    fn call<'a>(
        &'a self,
        _request: ProxyRequest,
    ) -> ProviderFuture<'a, Result<ProxyEnvelope, ProviderError>> {
        Box::pin(async { Ok(ProxyEnvelope::ok(json!({"output": {"ok": true}}))) })
    }
}

#[tokio::test]
async fn gateway_call_survives_panicking_hooks() {
    let gateway = ProxyGateway::new(Arc::new(OkTransport))
        .with_hooks(Arc::new(SafeProviderHooks::new(PanicProviderHooks)));

    let data = gateway
        .call(ProxyService::Arcade, "execute_tool", json!({}))
        .await
        .expect("call should succeed despite hook panics");
    assert_eq!(data, json!({"output": {"ok": true}}));
}
