//! Completion-service payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Annotation, AssistantMessage, ChatCompletion, ChatCompletionRequest, CompletionMessage,
    ContentBlock, HostedTool, InputContent, OutputItem, ProviderError, ProxyEnvelope,
    ResponseFormat, ResponseStatus, ResponsesInput, ResponsesObject, ResponsesRequest,
    ToolCallRequest, ToolSpec, UrlCitation,
};

pub(crate) fn build_chat_completion_payload(
    request: ChatCompletionRequest,
) -> Result<Value, ProviderError> {
    request.validate()?;

    let messages = request
        .messages
        .into_iter()
        .map(ApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(request.tools.into_iter().map(ApiTool::from).collect())
    };

    let payload = ApiChatCompletionRequest {
        model: request.model,
        messages,
        tools,
        tool_choice: request.require_tool.then(|| "required".to_string()),
    };

    to_payload(&payload)
}

pub(crate) fn build_responses_payload(request: ResponsesRequest) -> Result<Value, ProviderError> {
    request.validate()?;

    let input = match request.input {
        ResponsesInput::Text(text) => ApiResponsesInput::Text(text),
        ResponsesInput::Messages(messages) => ApiResponsesInput::Messages(
            messages
                .into_iter()
                .map(|message| ApiInputMessage {
                    role: message.role.as_str().to_string(),
                    content: message
                        .content
                        .into_iter()
                        .map(|content| match content {
                            InputContent::Text(text) => ApiInputContent::InputText { text },
                            InputContent::Image(image_url) => {
                                ApiInputContent::InputImage { image_url }
                            }
                        })
                        .collect(),
                })
                .collect(),
        ),
    };

    let text = request.format.map(|format| ApiTextConfig {
        format: ApiTextFormat {
            kind: match format {
                ResponseFormat::JsonObject => "json_object".to_string(),
            },
        },
    });

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(
            request
                .tools
                .into_iter()
                .map(|tool| ApiHostedTool {
                    kind: match tool {
                        HostedTool::WebSearchPreview => "web_search_preview".to_string(),
                    },
                })
                .collect(),
        )
    };

    let payload = ApiResponsesRequest {
        model: request.model,
        input,
        previous_response_id: request.previous_response_id,
        instructions: request.instructions,
        text,
        tools,
    };

    to_payload(&payload)
}

pub(crate) fn decode_chat_completion(data: Value) -> Result<ChatCompletion, ProviderError> {
    let parsed: ApiChatCompletion = serde_json::from_value(data).map_err(|err| {
        ProviderError::other(format!("unexpected chat completion payload: {err}"))
    })?;

    let message = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .map(|message| AssistantMessage {
            content: message.content,
            tool_calls: message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(|call| ToolCallRequest {
                    call_id: call.id,
                    name: call.function.name,
                    arguments: call.function.arguments,
                })
                .collect(),
        });

    Ok(ChatCompletion {
        model: parsed.model,
        message,
    })
}

pub(crate) fn decode_responses_object(data: Value) -> Result<ResponsesObject, ProviderError> {
    let parsed: ApiResponsesObject = serde_json::from_value(data)
        .map_err(|err| ProviderError::other(format!("unexpected responses payload: {err}")))?;

    let error = parsed.error.filter(reports_error).map(|error| {
        error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
            .filter(|message| !message.is_empty())
            .map(ToString::to_string)
    });

    let output = parsed
        .output
        .unwrap_or_default()
        .into_iter()
        .map(OutputItem::from)
        .collect();

    Ok(ResponsesObject {
        id: parsed.id,
        status: parsed.status.as_deref().map(ResponseStatus::parse),
        output,
        error,
        incomplete_reason: parsed.incomplete_details.and_then(|details| details.reason),
    })
}

/// `null`, `false`, `0` and `""` mean the service reported no error.
fn reports_error(error: &Value) -> bool {
    match error {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(message) => !message.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn decode_tool_spec(value: Value) -> Result<ToolSpec, ProviderError> {
    let parsed: ApiTool = serde_json::from_value(value)
        .map_err(|err| ProviderError::other(format!("unexpected tool definition: {err}")))?;

    Ok(ToolSpec {
        name: parsed.function.name,
        description: parsed.function.description.unwrap_or_default(),
        parameters: parsed
            .function
            .parameters
            .unwrap_or_else(|| json!({"type": "object", "properties": {}})),
    })
}

/// Pulls a readable message out of a non-2xx proxy body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<ProxyEnvelope>(body)
        && let Some(message) = envelope.failure_message()
    {
        return Some(message);
    }

    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    match parsed.detail {
        Some(Value::String(detail)) => Some(detail),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}

fn to_payload<T: Serialize>(payload: &T) -> Result<Value, ProviderError> {
    serde_json::to_value(payload)
        .map_err(|err| ProviderError::invalid_request(format!("payload serialization failed: {err}")))
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ApiChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl TryFrom<CompletionMessage> for ApiMessage {
    type Error = ProviderError;

    fn try_from(value: CompletionMessage) -> Result<Self, Self::Error> {
        match value {
            CompletionMessage::Text(message) => Ok(Self {
                role: message.role.as_str().to_string(),
                content: Some(message.content),
                tool_calls: None,
                tool_call_id: None,
            }),
            CompletionMessage::AssistantToolCalls {
                content,
                tool_calls,
            } => Ok(Self {
                role: "assistant".to_string(),
                content,
                tool_calls: Some(
                    tool_calls
                        .into_iter()
                        .map(|call| ApiToolCall {
                            id: call.call_id,
                            kind: function_kind(),
                            function: ApiToolFunction {
                                name: call.name,
                                arguments: call.arguments,
                            },
                        })
                        .collect(),
                ),
                tool_call_id: None,
            }),
            CompletionMessage::ToolResult {
                tool_call_id,
                content,
            } => {
                if tool_call_id.is_empty() {
                    return Err(ProviderError::invalid_request(
                        "tool result messages require a tool_call_id",
                    ));
                }

                Ok(Self {
                    role: "tool".to_string(),
                    content: Some(content),
                    tool_calls: None,
                    tool_call_id: Some(tool_call_id),
                })
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: ApiToolFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiTool {
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: ApiFunction,
}

impl From<ToolSpec> for ApiTool {
    fn from(value: ToolSpec) -> Self {
        Self {
            kind: function_kind(),
            function: ApiFunction {
                name: value.name,
                description: Some(value.description),
                parameters: Some(value.parameters),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiAssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiAssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Serialize)]
struct ApiResponsesRequest {
    model: String,
    input: ApiResponsesInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_response_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<ApiTextConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiHostedTool>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ApiResponsesInput {
    Text(String),
    Messages(Vec<ApiInputMessage>),
}

#[derive(Debug, Serialize)]
struct ApiInputMessage {
    role: String,
    content: Vec<ApiInputContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ApiInputContent {
    InputText { text: String },
    InputImage { image_url: String },
}

#[derive(Debug, Serialize)]
struct ApiTextConfig {
    format: ApiTextFormat,
}

#[derive(Debug, Serialize)]
struct ApiTextFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
struct ApiHostedTool {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponsesObject {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<Vec<ApiOutputItem>>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    incomplete_details: Option<ApiIncompleteDetails>,
}

#[derive(Debug, Deserialize)]
struct ApiIncompleteDetails {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiOutputItem {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<Vec<ApiContentBlock>>,
}

impl From<ApiOutputItem> for OutputItem {
    fn from(value: ApiOutputItem) -> Self {
        match value.kind.as_deref() {
            Some("message") => Self::Message(
                value
                    .content
                    .unwrap_or_default()
                    .into_iter()
                    .map(ContentBlock::from)
                    .collect(),
            ),
            other => Self::Other(other.unwrap_or("unknown").to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    annotations: Option<Vec<ApiAnnotation>>,
}

impl From<ApiContentBlock> for ContentBlock {
    fn from(value: ApiContentBlock) -> Self {
        match value.kind.as_deref() {
            Some("output_text") => Self::OutputText {
                text: value.text.unwrap_or_default(),
                annotations: value
                    .annotations
                    .unwrap_or_default()
                    .into_iter()
                    .map(Annotation::from)
                    .collect(),
            },
            other => Self::Other(other.unwrap_or("unknown").to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiAnnotation {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    start_index: Option<u64>,
    #[serde(default)]
    end_index: Option<u64>,
}

impl From<ApiAnnotation> for Annotation {
    fn from(value: ApiAnnotation) -> Self {
        match value.kind.as_deref() {
            Some("url_citation") => Self::UrlCitation(UrlCitation {
                title: value.title,
                url: value.url,
                start_index: value.start_index,
                end_index: value.end_index,
            }),
            other => Self::Other(other.unwrap_or("unknown").to_string()),
        }
    }
}
