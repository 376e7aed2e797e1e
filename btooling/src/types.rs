//! Tool runtime context and execution result types.

use bcommon::{BoxFuture, SessionId};
use bprovider::{CompletionMessage, ToolCallRequest};
use serde_json::json;

use crate::ToolError;

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolExecutionContext {
    pub session_id: Option<SessionId>,
    pub toolkits: Vec<String>,
}

impl ToolExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_session(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            toolkits: Vec::new(),
        }
    }

    pub fn with_toolkits<I, S>(mut self, toolkits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toolkits = toolkits.into_iter().map(Into::into).collect();
        self
    }
}

/// Content recorded for one tool call, keyed by the model's correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionResult {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolExecutionResult {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }

    pub fn from_call(call: &ToolCallRequest, output: impl Into<String>) -> Self {
        Self::new(call.call_id.clone(), output)
    }

    /// Records a failure as `{"error": message}` so the model can see it.
    pub fn from_error(call: &ToolCallRequest, error: &ToolError) -> Self {
        Self::from_call(call, json!({"error": error.message}).to_string())
    }

    pub fn into_message(self) -> CompletionMessage {
        CompletionMessage::tool_result(self.tool_call_id, self.output)
    }
}
