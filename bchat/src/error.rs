//! Chat-layer errors and classification.
//!
//! Every caller-facing operation reports failures in a phase, and the phase
//! prefix is part of the rendered message:
//!
//! ```rust
//! use bchat::{ChatError, ChatErrorPhase};
//! use bprovider::ProviderError;
//!
//! let error = ChatError::from(ProviderError::no_json_found("No valid JSON found in response"))
//!     .within(ChatErrorPhase::JsonGeneration);
//! assert_eq!(
//!     error.to_string(),
//!     "GPT JSON generation request failed: No valid JSON found in response"
//! );
//!
//! let nested = error.within(ChatErrorPhase::WebSearch);
//! assert!(nested.to_string().starts_with("GPT web search request failed: GPT JSON generation"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use bprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    Store,
    Tooling,
}

/// The caller-facing operation an error surfaced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorPhase {
    Ask,
    Chat,
    ToolEnabled,
    JsonGeneration,
    ImageAnalysis,
    WebSearch,
}

impl ChatErrorPhase {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Ask => "GPT request failed",
            Self::Chat => "GPT chat request failed",
            Self::ToolEnabled => "GPT tool-enabled request failed",
            Self::JsonGeneration => "GPT JSON generation request failed",
            Self::ImageAnalysis => "GPT image analysis request failed",
            Self::WebSearch => "GPT web search request failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub phase: Option<ChatErrorPhase>,
    pub message: String,
    /// Set when the failure came from the provider layer.
    pub provider_kind: Option<ProviderErrorKind>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            phase: None,
            message: message.into(),
            provider_kind: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Tooling, message)
    }

    /// Attributes the error to `phase`. An error that already carries a phase
    /// keeps its rendered text as the message, so prefixes nest.
    pub fn within(mut self, phase: ChatErrorPhase) -> Self {
        if self.phase.is_some() {
            self.message = self.to_string();
        }

        self.phase = Some(phase);
        self
    }

    pub fn is_provider_kind(&self, kind: ProviderErrorKind) -> bool {
        self.provider_kind == Some(kind)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "{}: {}", phase.prefix(), self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        Self {
            kind: ChatErrorKind::Provider,
            phase: None,
            message: value.message,
            provider_kind: Some(value.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_kind() {
        let error = ChatError::from(ProviderError::json_parse("Failed to parse JSON response"));
        assert_eq!(error.kind, ChatErrorKind::Provider);
        assert!(error.is_provider_kind(ProviderErrorKind::JsonParse));
        assert_eq!(error.to_string(), "Provider: Failed to parse JSON response");
    }

    #[test]
    fn phase_prefixes_match_operations() {
        let error = ChatError::provider("No message in response").within(ChatErrorPhase::ToolEnabled);
        assert_eq!(
            error.to_string(),
            "GPT tool-enabled request failed: No message in response"
        );

        let chat = ChatError::store("session store lock poisoned").within(ChatErrorPhase::Chat);
        assert_eq!(
            chat.to_string(),
            "GPT chat request failed: session store lock poisoned"
        );
        assert_eq!(chat.kind, ChatErrorKind::Store);
    }

    #[test]
    fn nesting_preserves_inner_prefix() {
        let error = ChatError::provider("Request failed")
            .within(ChatErrorPhase::JsonGeneration)
            .within(ChatErrorPhase::WebSearch);

        assert_eq!(error.phase, Some(ChatErrorPhase::WebSearch));
        assert_eq!(
            error.to_string(),
            "GPT web search request failed: GPT JSON generation request failed: Request failed"
        );
    }
}
