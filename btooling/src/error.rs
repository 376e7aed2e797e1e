//! Tool execution errors and classifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

use bprovider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    InvalidArguments,
    Execution,
    /// The broker reported `auth_required` for the tool.
    AuthorizationRequired,
    /// The user did not finish the authorization flow.
    AuthorizationIncomplete,
    Discovery,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub retryable: bool,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            tool_name: None,
            tool_call_id: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message, false)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message, false)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message, false)
    }

    pub fn authorization_required(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::AuthorizationRequired, message, true)
    }

    pub fn authorization_incomplete(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::AuthorizationIncomplete, message, false)
    }

    pub fn discovery(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Discovery, message, false)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Other, message, false)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<String>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn is_authorization(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::AuthorizationRequired | ToolErrorKind::AuthorizationIncomplete
        )
    }
}

impl From<ProviderError> for ToolError {
    fn from(value: ProviderError) -> Self {
        Self::new(ToolErrorKind::Execution, value.message, value.retryable)
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tool_name, &self.tool_call_id) {
            (Some(tool_name), Some(tool_call_id)) => write!(
                f,
                "{:?} [tool={}, call_id={}]: {}",
                self.kind, tool_name, tool_call_id, self.message
            ),
            (Some(tool_name), None) => {
                write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}
