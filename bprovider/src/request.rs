//! Provider-neutral conversation types and the two supported request forms.
//!
//! Single-shot chat completions resend the whole transcript on every call and
//! are the only form that can carry tool definitions and tool results.
//! Responses requests either seed a conversation with structured content
//! blocks or continue one by referencing the previous response id.
//!
//! ```rust
//! use bprovider::{ChatCompletionRequest, ChatMessage, ProviderErrorKind, ResponsesInput, ResponsesRequest};
//!
//! let ok = ChatCompletionRequest::builder("gpt-4o-mini")
//!     .message(ChatMessage::user("Summarize this diff"))
//!     .build();
//! assert!(ok.is_ok());
//!
//! let err = ChatCompletionRequest::builder("gpt-4o-mini").build().expect_err("no messages");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//!
//! let next = ResponsesRequest::continuation("gpt-4o-mini", "resp_1", "And then?");
//! assert_eq!(next.input, ResponsesInput::Text("And then?".to_string()));
//! assert_eq!(next.previous_response_id.as_deref(), Some("resp_1"));
//! ```

use serde_json::Value;

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRequest {
    pub call_id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCallRequest {
    pub fn new(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Function tool specification as published by a toolkit registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Decodes an OpenAI-formatted `{type: "function", function: {...}}` spec.
    pub fn from_openai_value(value: Value) -> Result<Self, ProviderError> {
        crate::serde_api::decode_tool_spec(value)
    }
}

/// One entry of a chat-completion transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionMessage {
    Text(ChatMessage),
    AssistantToolCalls {
        content: Option<String>,
        tool_calls: Vec<ToolCallRequest>,
    },
    ToolResult {
        tool_call_id: String,
        content: String,
    },
}

impl CompletionMessage {
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

impl From<ChatMessage> for CompletionMessage {
    fn from(value: ChatMessage) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub tools: Vec<ToolSpec>,
    /// Sent as `tool_choice: "required"`.
    pub require_tool: bool,
}

impl ChatCompletionRequest {
    pub fn builder(model: impl Into<String>) -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::new(model)
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }

        if self.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one message is required",
            ));
        }

        if self.require_tool && self.tools.is_empty() {
            return Err(ProviderError::invalid_request(
                "a required tool choice needs at least one tool",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequestBuilder {
    model: String,
    messages: Vec<CompletionMessage>,
    tools: Vec<ToolSpec>,
    require_tool: bool,
}

impl ChatCompletionRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            tools: Vec::new(),
            require_tool: false,
        }
    }

    pub fn message(mut self, message: impl Into<CompletionMessage>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn messages<I, M>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<CompletionMessage>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
        self
    }

    /// Attaches tools and forces the model to pick one when any are present.
    pub fn required_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.require_tool = !tools.is_empty();
        self.tools = tools;
        self
    }

    pub fn build(self) -> Result<ChatCompletionRequest, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.model,
            messages: self.messages,
            tools: self.tools,
            require_tool: self.require_tool,
        };

        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputContent {
    Text(String),
    /// A `data:image/...` URL.
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMessage {
    pub role: Role,
    pub content: Vec<InputContent>,
}

impl InputMessage {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![InputContent::Text(text.into())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsesInput {
    Text(String),
    Messages(Vec<InputMessage>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    JsonObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedTool {
    WebSearchPreview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: ResponsesInput,
    pub previous_response_id: Option<String>,
    pub instructions: Option<String>,
    pub format: Option<ResponseFormat>,
    pub tools: Vec<HostedTool>,
}

impl ResponsesRequest {
    pub fn new(model: impl Into<String>, input: ResponsesInput) -> Self {
        Self {
            model: model.into(),
            input,
            previous_response_id: None,
            instructions: None,
            format: None,
            tools: Vec::new(),
        }
    }

    /// Continues a stateful conversation: only the new message is sent.
    pub fn continuation(
        model: impl Into<String>,
        previous_response_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut request = Self::new(model, ResponsesInput::Text(message.into()));
        request.previous_response_id = Some(previous_response_id.into());
        request
    }

    /// Starts a stateful conversation with an optional system message.
    pub fn seeded(
        model: impl Into<String>,
        system_prompt: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        let mut messages = Vec::new();
        if let Some(system_prompt) = system_prompt.filter(|prompt| !prompt.is_empty()) {
            messages.push(InputMessage::text(Role::System, system_prompt));
        }

        messages.push(InputMessage::text(Role::User, message));
        Self::new(model, ResponsesInput::Messages(messages))
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_json_format(mut self) -> Self {
        self.format = Some(ResponseFormat::JsonObject);
        self
    }

    pub fn with_tool(mut self, tool: HostedTool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }

        match &self.input {
            ResponsesInput::Messages(messages) if messages.is_empty() => Err(
                ProviderError::invalid_request("at least one input message is required"),
            ),
            _ => Ok(()),
        }
    }
}
