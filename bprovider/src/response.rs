//! Typed completion results decoded at the proxy boundary.

use crate::ToolCallRequest;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssistantMessage {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCallRequest>,
}

impl AssistantMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Result of a `chat_completion` operation: the first choice's message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatCompletion {
    pub model: Option<String>,
    pub message: Option<AssistantMessage>,
}

impl ChatCompletion {
    pub fn content(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|message| message.content.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    Completed,
    InProgress,
    Failed,
    Incomplete,
    Other(String),
}

impl ResponseStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => Self::Completed,
            "in_progress" => Self::InProgress,
            "failed" => Self::Failed,
            "incomplete" => Self::Incomplete,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCitation {
    pub title: Option<String>,
    pub url: Option<String>,
    pub start_index: Option<u64>,
    pub end_index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    UrlCitation(UrlCitation),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    OutputText {
        text: String,
        annotations: Vec<Annotation>,
    },
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    Message(Vec<ContentBlock>),
    Other(String),
}

/// Result of a `responses_create` operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponsesObject {
    pub id: Option<String>,
    pub status: Option<ResponseStatus>,
    pub output: Vec<OutputItem>,
    /// `Some` whenever the service reported an error field; the message may be absent.
    pub error: Option<Option<String>>,
    pub incomplete_reason: Option<String>,
}

impl ResponsesObject {
    pub fn output_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            status: Some(ResponseStatus::Completed),
            output: vec![OutputItem::Message(vec![ContentBlock::OutputText {
                text: text.into(),
                annotations: Vec::new(),
            }])],
            error: None,
            incomplete_reason: None,
        }
    }
}

/// Closed set of completion result shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionPayload {
    Chat(ChatCompletion),
    Responses(ResponsesObject),
}
