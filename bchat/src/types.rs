//! Chat session, turn, and structured-output request types.

use bcommon::SessionId;
use bprovider::ChatMessage;

/// Conversation state kept per session id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    /// Id of the most recent successful stateful response.
    pub last_response_id: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnRequest {
    pub message: String,
    pub session_id: Option<SessionId>,
    /// Only applied when the session has no history yet.
    pub system_prompt: Option<String>,
    pub toolkits: Vec<String>,
}

impl ChatTurnRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
            system_prompt: None,
            toolkits: Vec::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub toolkits: Vec<String>,
}

impl AskRequest {
    pub fn new(prompt: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: system_prompt.into(),
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRequest {
    pub prompt: String,
    pub schema_example: String,
    pub system_prompt: String,
    pub model: Option<String>,
}

impl JsonRequest {
    pub fn new(
        prompt: impl Into<String>,
        schema_example: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            schema_example: schema_example.into(),
            system_prompt: system_prompt.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAnalysisRequest {
    /// Raw base64 data or a complete `data:image/...` URL.
    pub image_base64: String,
    pub prompt: String,
    pub schema_example: String,
    pub system_prompt: String,
}

impl ImageAnalysisRequest {
    pub fn new(
        image_base64: impl Into<String>,
        prompt: impl Into<String>,
        schema_example: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            image_base64: image_base64.into(),
            prompt: prompt.into(),
            schema_example: schema_example.into(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn image_data_url(&self) -> String {
        if self.image_base64.starts_with("data:image/") {
            self.image_base64.clone()
        } else {
            format!("data:image/jpeg;base64,{}", self.image_base64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchRequest {
    pub query: String,
    pub schema_example: String,
    pub prompt: Option<String>,
    pub system_prompt: Option<String>,
}

impl WebSearchRequest {
    pub fn new(query: impl Into<String>, schema_example: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            schema_example: schema_example.into(),
            prompt: None,
            system_prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_data_url_adds_jpeg_prefix_only_when_missing() {
        let raw = ImageAnalysisRequest::new("AAAA", "what", "{}", "");
        assert_eq!(raw.image_data_url(), "data:image/jpeg;base64,AAAA");

        let url = ImageAnalysisRequest::new("data:image/png;base64,BBBB", "what", "{}", "");
        assert_eq!(url.image_data_url(), "data:image/png;base64,BBBB");
    }

    #[test]
    fn turn_request_builder_collects_options() {
        let request = ChatTurnRequest::new("hi")
            .with_session_id("session-1")
            .with_system_prompt("be brief")
            .with_toolkits(["Math"]);

        assert_eq!(request.session_id, Some(SessionId::from("session-1")));
        assert_eq!(request.system_prompt.as_deref(), Some("be brief"));
        assert_eq!(request.toolkits, vec!["Math".to_string()]);
    }
}
