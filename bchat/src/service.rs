//! Caller-facing chat operations over the completion service and tool runtime.

use std::sync::Arc;

use bcommon::SessionId;
use bprovider::interpret::{extract_citations, extract_json, extract_text, handle_error};
use bprovider::{
    ChatCompletionRequest, ChatMessage, CompletionClient, HostedTool, InputContent, InputMessage,
    ResponsesInput, ResponsesObject, ResponsesRequest, Role,
};
use btooling::{ToolExecutionContext, ToolRuntime};
use serde_json::Value;

use crate::prompts::{
    DEFAULT_SEARCH_SYSTEM_PROMPT, SEARCH_FORMAT_SYSTEM_PROMPT, image_prompt, json_instructions,
    json_prompt, search_format_prompt, search_prompt, tools_system_prompt,
};
use crate::{
    AskRequest, ChatError, ChatErrorPhase, ChatReply, ChatTurnRequest, ImageAnalysisRequest,
    InMemorySessionStore, JsonRequest, SessionStore, ToolOrchestrator, WebSearchRequest,
};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Model selection per flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPolicy {
    /// Used by `ask`, stateful chat, and the structured-output operations.
    pub default_model: String,
    /// Used by tool-enabled turns.
    pub tool_model: String,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            tool_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ChatPolicy {
    pub fn with_model(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            default_model: model.clone(),
            tool_model: model,
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    completions: CompletionClient,
    store: Arc<dyn SessionStore>,
    tools: Option<ToolOrchestrator>,
    policy: ChatPolicy,
}

impl ChatService {
    pub fn builder(completions: CompletionClient) -> ChatServiceBuilder {
        ChatServiceBuilder::new(completions)
    }

    pub fn policy(&self) -> &ChatPolicy {
        &self.policy
    }

    /// Single-shot question. With toolkits the turn goes through the tool loop.
    pub async fn ask(&self, request: AskRequest) -> Result<String, ChatError> {
        if !request.toolkits.is_empty() {
            let messages = vec![
                ChatMessage::system(tools_system_prompt(
                    &request.toolkits,
                    Some(request.system_prompt.as_str()),
                )),
                ChatMessage::user(request.prompt),
            ];
            let context = ToolExecutionContext::new().with_toolkits(request.toolkits);
            return self.orchestrator()?.run(messages, context).await;
        }

        self.ask_plain(request)
            .await
            .map_err(|error| error.within(ChatErrorPhase::Ask))
    }

    async fn ask_plain(&self, request: AskRequest) -> Result<String, ChatError> {
        let completion_request = ChatCompletionRequest::builder(self.policy.default_model.clone())
            .message(ChatMessage::system(request.system_prompt))
            .message(ChatMessage::user(request.prompt))
            .build()?;

        let completion = self.completions.chat_completion(completion_request).await?;
        Ok(completion.content().to_string())
    }

    /// Runs one conversational turn and records it once it has succeeded.
    pub async fn chat(&self, request: ChatTurnRequest) -> Result<ChatReply, ChatError> {
        let session_id = request
            .session_id
            .clone()
            .filter(|id| !id.as_str().is_empty())
            .unwrap_or_else(SessionId::generate);

        if request.toolkits.is_empty() {
            self.chat_stateful(request, session_id)
                .await
                .map_err(|error| error.within(ChatErrorPhase::Chat))
        } else {
            self.chat_with_tools(request, session_id).await
        }
    }

    async fn chat_stateful(
        &self,
        request: ChatTurnRequest,
        session_id: SessionId,
    ) -> Result<ChatReply, ChatError> {
        let session = self.store.get_or_create(&session_id).await?;
        let model = self.policy.default_model.clone();

        let responses_request = match &session.last_response_id {
            Some(previous) => ResponsesRequest::continuation(model, previous, &request.message),
            None => ResponsesRequest::seeded(
                model,
                request.system_prompt.as_deref(),
                &request.message,
            ),
        };

        let response = self.create_response(responses_request).await?;
        let text = extract_text(&response);

        self.store
            .commit_turn(
                &session_id,
                vec![
                    ChatMessage::user(request.message),
                    ChatMessage::assistant(text.clone()),
                ],
                response.id,
            )
            .await?;

        Ok(ChatReply { text, session_id })
    }

    async fn chat_with_tools(
        &self,
        request: ChatTurnRequest,
        session_id: SessionId,
    ) -> Result<ChatReply, ChatError> {
        let session = self
            .store
            .get_or_create(&session_id)
            .await
            .map_err(|error| error.within(ChatErrorPhase::Chat))?;

        let mut messages = Vec::with_capacity(session.messages.len() + 2);
        if session.is_empty() {
            messages.push(ChatMessage::system(tools_system_prompt(
                &request.toolkits,
                request.system_prompt.as_deref(),
            )));
        }
        messages.extend(session.messages);
        messages.push(ChatMessage::user(request.message.clone()));

        let context = ToolExecutionContext::for_session(session_id.clone())
            .with_toolkits(request.toolkits);
        let text = self.orchestrator()?.run(messages, context).await?;

        self.store
            .commit_turn(
                &session_id,
                vec![
                    ChatMessage::user(request.message),
                    ChatMessage::assistant(text.clone()),
                ],
                None,
            )
            .await
            .map_err(|error| error.within(ChatErrorPhase::Chat))?;

        Ok(ChatReply { text, session_id })
    }

    pub async fn chat_history(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Vec<ChatMessage>>, ChatError> {
        self.store.history(session_id).await
    }

    pub async fn clear_chat(&self, session_id: &SessionId) -> Result<bool, ChatError> {
        self.store.clear(session_id).await
    }

    /// Generates a JSON object shaped like `schema_example`.
    pub async fn get_json(&self, request: JsonRequest) -> Result<Value, ChatError> {
        self.get_json_inner(request)
            .await
            .map_err(|error| error.within(ChatErrorPhase::JsonGeneration))
    }

    async fn get_json_inner(&self, request: JsonRequest) -> Result<Value, ChatError> {
        let model = request
            .model
            .unwrap_or_else(|| self.policy.default_model.clone());
        let responses_request =
            ResponsesRequest::new(model, ResponsesInput::Text(json_prompt(&request.prompt)))
                .with_instructions(json_instructions(
                    &request.system_prompt,
                    &request.schema_example,
                ))
                .with_json_format();

        let response = self.create_response(responses_request).await?;
        Ok(extract_json(&response)?)
    }

    pub async fn analyze_image(&self, request: ImageAnalysisRequest) -> Result<Value, ChatError> {
        self.analyze_image_inner(request)
            .await
            .map_err(|error| error.within(ChatErrorPhase::ImageAnalysis))
    }

    async fn analyze_image_inner(&self, request: ImageAnalysisRequest) -> Result<Value, ChatError> {
        let input = InputMessage {
            role: Role::User,
            content: vec![
                InputContent::Text(image_prompt(&request.prompt, &request.schema_example)),
                InputContent::Image(request.image_data_url()),
            ],
        };
        let responses_request = ResponsesRequest::new(
            self.policy.default_model.clone(),
            ResponsesInput::Messages(vec![input]),
        )
        .with_instructions(request.system_prompt)
        .with_json_format();

        let response = self.create_response(responses_request).await?;
        Ok(extract_json(&response)?)
    }

    /// Searches the web, then reshapes the cited results through [`Self::get_json`].
    pub async fn web_search(&self, request: WebSearchRequest) -> Result<Value, ChatError> {
        self.web_search_inner(request)
            .await
            .map_err(|error| error.within(ChatErrorPhase::WebSearch))
    }

    async fn web_search_inner(&self, request: WebSearchRequest) -> Result<Value, ChatError> {
        let instructions = request
            .system_prompt
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_SYSTEM_PROMPT.to_string());
        let responses_request = ResponsesRequest::new(
            self.policy.default_model.clone(),
            ResponsesInput::Text(search_prompt(&request.query, request.prompt.as_deref())),
        )
        .with_instructions(instructions)
        .with_tool(HostedTool::WebSearchPreview);

        let response = self.create_response(responses_request).await?;
        let citations = extract_citations(&response);
        let format_prompt = search_format_prompt(&citations, &extract_text(&response));

        self.get_json(JsonRequest::new(
            format_prompt,
            request.schema_example,
            SEARCH_FORMAT_SYSTEM_PROMPT,
        ))
        .await
    }

    async fn create_response(&self, request: ResponsesRequest) -> Result<ResponsesObject, ChatError> {
        let response = self.completions.responses_create(request).await?;
        Ok(handle_error(Some(response))?)
    }

    fn orchestrator(&self) -> Result<&ToolOrchestrator, ChatError> {
        self.tools.as_ref().ok_or_else(|| {
            ChatError::tooling("tool runtime is not configured").within(ChatErrorPhase::ToolEnabled)
        })
    }
}

pub struct ChatServiceBuilder {
    completions: CompletionClient,
    store: Option<Arc<dyn SessionStore>>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: ChatPolicy,
}

impl ChatServiceBuilder {
    pub fn new(completions: CompletionClient) -> Self {
        Self {
            completions,
            store: None,
            tool_runtime: None,
            policy: ChatPolicy::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn tool_runtime(mut self, tool_runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tool_runtime = Some(tool_runtime);
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> ChatService {
        let tools = self.tool_runtime.map(|runtime| {
            ToolOrchestrator::new(
                self.completions.clone(),
                runtime,
                self.policy.tool_model.clone(),
            )
        });

        ChatService {
            completions: self.completions,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()) as Arc<dyn SessionStore>),
            tools,
            policy: self.policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use bprovider::{
        ProviderError, ProviderErrorKind, ProviderFuture, ProxyEnvelope, ProxyGateway,
        ProxyRequest, ProxyTransport,
    };
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<ProxyEnvelope>>,
        seen: Mutex<Vec<ProxyRequest>>,
    }

    impl ScriptedTransport {
        fn with(replies: Vec<ProxyEnvelope>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn payload(&self, index: usize) -> Value {
            self.seen.lock().expect("seen lock")[index].payload.clone()
        }
    }

    impl ProxyTransport for ScriptedTransport {
        fn call<'a>(
            &'a self,
            request: ProxyRequest,
        ) -> ProviderFuture<'a, Result<ProxyEnvelope, ProviderError>> {
            Box::pin(async move {
                self.seen.lock().expect("seen lock").push(request);
                self.replies
                    .lock()
                    .expect("replies lock")
                    .pop_front()
                    .ok_or_else(|| ProviderError::other("no scripted reply"))
            })
        }
    }

    fn service(transport: Arc<ScriptedTransport>) -> ChatService {
        ChatService::builder(CompletionClient::new(ProxyGateway::new(transport))).build()
    }

    fn output_text(text: &str, annotations: Value) -> ProxyEnvelope {
        ProxyEnvelope::ok(json!({
            "id": "resp_1",
            "status": "completed",
            "output": [{
                "type": "message",
                "content": [{"type": "output_text", "text": text, "annotations": annotations}]
            }]
        }))
    }

    #[tokio::test]
    async fn ask_without_tool_runtime_still_answers_plain_prompts() {
        let transport = ScriptedTransport::with(vec![ProxyEnvelope::ok(json!({
            "choices": [{"message": {"content": "4"}}]
        }))]);
        let service = service(transport.clone());

        let answer = service
            .ask(AskRequest::new("2+2?", ""))
            .await
            .expect("plain ask succeeds");
        assert_eq!(answer, "4");
        assert_eq!(transport.payload(0)["messages"][0]["content"], "");

        let error = service
            .ask(AskRequest::new("2+2?", "").with_toolkits(["Math"]))
            .await
            .expect_err("no runtime configured");
        assert_eq!(error.kind, crate::ChatErrorKind::Tooling);
        assert_eq!(error.phase, Some(ChatErrorPhase::ToolEnabled));
    }

    #[tokio::test]
    async fn chat_sends_blank_messages_like_any_other() {
        let transport = ScriptedTransport::with(vec![output_text("Say something?", json!([]))]);
        let service = service(transport.clone());

        let reply = service
            .chat(ChatTurnRequest::new("   ").with_session_id("quiet"))
            .await
            .expect("blank message is still a turn");
        assert_eq!(reply.text, "Say something?");

        let payload = transport.payload(0);
        assert_eq!(payload["input"][0]["content"][0]["text"], "   ");

        let history = service
            .chat_history(&reply.session_id)
            .await
            .expect("history")
            .expect("session exists");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "   ");
    }

    #[tokio::test]
    async fn analyze_image_sends_prompt_and_data_url() {
        let transport =
            ScriptedTransport::with(vec![output_text(r#"{"objects":["cat"]}"#, json!([]))]);
        let service = service(transport.clone());

        let value = service
            .analyze_image(ImageAnalysisRequest::new(
                "AAAA",
                "List the objects.",
                r#"{"objects":[]}"#,
                "You label images.",
            ))
            .await
            .expect("analysis succeeds");
        assert_eq!(value, json!({"objects": ["cat"]}));

        let payload = transport.payload(0);
        assert_eq!(payload["instructions"], "You label images.");
        assert_eq!(payload["text"]["format"]["type"], "json_object");
        let content = &payload["input"][0]["content"];
        assert_eq!(
            content[0]["text"],
            r#"List the objects. Please format your response according to this JSON schema: {"objects":[]}"#
        );
        assert_eq!(content[1]["image_url"], "data:image/jpeg;base64,AAAA");
    }

    #[tokio::test]
    async fn analyze_image_reports_api_errors_in_its_phase() {
        let transport = ScriptedTransport::with(vec![ProxyEnvelope::ok(json!({
            "error": {"message": "image too large"}
        }))]);
        let service = service(transport);

        let error = service
            .analyze_image(ImageAnalysisRequest::new("AAAA", "x", "{}", "y"))
            .await
            .expect_err("api error");
        assert!(error.is_provider_kind(ProviderErrorKind::Api));
        assert_eq!(
            error.to_string(),
            "GPT image analysis request failed: image too large"
        );
    }

    #[tokio::test]
    async fn web_search_formats_citations_through_json_generation() {
        let transport = ScriptedTransport::with(vec![
            output_text(
                "Rust 1.0 shipped in 2015.",
                json!([
                    {"type": "url_citation", "title": "Rust Blog", "url": "https://blog.rust-lang.org"},
                    {"type": "url_citation", "url": "https://example.com"}
                ]),
            ),
            output_text(r#"{"year":2015}"#, json!([])),
        ]);
        let service = service(transport.clone());

        let value = service
            .web_search(WebSearchRequest::new("Rust 1.0 release", r#"{"year":0}"#))
            .await
            .expect("search succeeds");
        assert_eq!(value, json!({"year": 2015}));

        let search = transport.payload(0);
        assert_eq!(search["input"], "Search for: Rust 1.0 release");
        assert_eq!(search["instructions"], DEFAULT_SEARCH_SYSTEM_PROMPT);
        assert_eq!(search["tools"][0]["type"], "web_search_preview");

        let format = transport.payload(1);
        let input = format["input"].as_str().expect("format input");
        assert!(input.contains("- Rust Blog: https://blog.rust-lang.org\n- : https://example.com"));
        assert!(input.ends_with("Additional context from search: Rust 1.0 shipped in 2015."));
        assert_eq!(format["text"]["format"]["type"], "json_object");
    }

    #[tokio::test]
    async fn web_search_nests_json_generation_failures() {
        let transport = ScriptedTransport::with(vec![
            output_text("nothing useful", json!([])),
            output_text("still not json", json!([])),
        ]);
        let service = service(transport);

        let error = service
            .web_search(WebSearchRequest::new("query", "{}"))
            .await
            .expect_err("format step fails");
        assert_eq!(error.phase, Some(ChatErrorPhase::WebSearch));
        assert!(error.is_provider_kind(ProviderErrorKind::JsonParse));
        assert_eq!(
            error.to_string(),
            "GPT web search request failed: GPT JSON generation request failed: Failed to parse JSON response"
        );
    }
}
