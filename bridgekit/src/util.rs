//! Small convenience constructors for common request types.

use crate::{
    AskRequest, ChatMessage, ChatTurnRequest, JsonRequest, Role, SessionId, WebSearchRequest,
};

pub fn system_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(Role::Assistant, content)
}

/// A plain question answered by one chat completion.
pub fn ask(prompt: impl Into<String>, system_prompt: impl Into<String>) -> AskRequest {
    AskRequest::new(prompt, system_prompt)
}

/// A question that may call tools from `toolkits`.
pub fn ask_with_tools<I, S>(
    prompt: impl Into<String>,
    system_prompt: impl Into<String>,
    toolkits: I,
) -> AskRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AskRequest::new(prompt, system_prompt).with_toolkits(toolkits)
}

/// A turn in `session`; an empty id asks the service to generate one.
pub fn turn(session: impl Into<SessionId>, message: impl Into<String>) -> ChatTurnRequest {
    ChatTurnRequest::new(message).with_session_id(session)
}

pub fn tool_turn<I, S>(
    session: impl Into<SessionId>,
    message: impl Into<String>,
    toolkits: I,
) -> ChatTurnRequest
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    turn(session, message).with_toolkits(toolkits)
}

pub fn json_request(
    prompt: impl Into<String>,
    schema_example: impl Into<String>,
    system_prompt: impl Into<String>,
) -> JsonRequest {
    JsonRequest::new(prompt, schema_example, system_prompt)
}

pub fn web_search(query: impl Into<String>, schema_example: impl Into<String>) -> WebSearchRequest {
    WebSearchRequest::new(query, schema_example)
}

#[cfg(test)]
mod tests {
    use crate::Role;

    use super::{ask_with_tools, tool_turn, turn, user_message};

    #[test]
    fn message_and_turn_helpers_apply_expected_defaults() {
        let message = user_message("hello");
        assert_eq!(message.role, Role::User);

        let plain = turn("session-1", "hello");
        assert_eq!(plain.session_id.as_ref().map(|id| id.as_str()), Some("session-1"));
        assert!(plain.toolkits.is_empty());

        let with_tools = tool_turn("session-1", "send it", ["Gmail"]);
        assert_eq!(with_tools.toolkits, vec!["Gmail".to_string()]);
    }

    #[test]
    fn ask_with_tools_collects_toolkits() {
        let request = ask_with_tools("sqrt of 16?", "", vec!["Math", "Search"]);
        assert_eq!(request.toolkits.len(), 2);
        assert_eq!(request.system_prompt, "");
    }
}
