use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use bprovider::{ProviderError, ProviderOperationHooks, ProxyService, ToolCallRequest};
use btooling::{
    AuthorizationHandshake, ToolError, ToolExecutionContext, ToolExecutionResult,
    ToolRuntimeHooks,
};

/// Shields the gateway from panicking provider hooks.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_call_start(&self, service: ProxyService, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_start(service, operation)
        }));
    }

    fn on_call_success(&self, service: ProxyService, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_success(service, operation, elapsed)
        }));
    }

    fn on_call_failure(
        &self,
        service: ProxyService,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_call_failure(service, operation, elapsed, error)
        }));
    }

    fn on_envelope_rejected(&self, service: ProxyService, operation: &str, message: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_envelope_rejected(service, operation, message)
        }));
    }
}

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCallRequest, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(tool_call, context)
        }));
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCallRequest,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCallRequest,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        }));
    }

    fn on_authorization_required(
        &self,
        tool_call: &ToolCallRequest,
        handshake: &AuthorizationHandshake,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_authorization_required(tool_call, handshake)
        }));
    }

    fn on_toolkit_discovery_failed(&self, toolkit: &str, error: &ToolError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_toolkit_discovery_failed(toolkit, error)
        }));
    }
}
