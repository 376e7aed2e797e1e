//! Runtime hooks for tool discovery, execution, and authorization events.
//!
//! ```rust
//! use btooling::{NoopToolRuntimeHooks, ToolRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = NoopToolRuntimeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use bprovider::ToolCallRequest;

use crate::{AuthorizationHandshake, ToolError, ToolExecutionContext, ToolExecutionResult};

pub trait ToolRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _tool_call: &ToolCallRequest, _context: &ToolExecutionContext) {}

    fn on_execution_success(
        &self,
        _tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCallRequest,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }

    fn on_authorization_required(
        &self,
        _tool_call: &ToolCallRequest,
        _handshake: &AuthorizationHandshake,
    ) {
    }

    /// A toolkit could not be listed; the turn continues without its tools.
    fn on_toolkit_discovery_failed(&self, _toolkit: &str, _error: &ToolError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolRuntimeHooks;

impl ToolRuntimeHooks for NoopToolRuntimeHooks {}
