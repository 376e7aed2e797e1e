//! Tool-enabled turn: discover, submit, execute each call, finalize.

use std::sync::Arc;

use bprovider::{
    ChatCompletionRequest, ChatMessage, CompletionClient, CompletionMessage, ProviderError,
};
use btooling::{ToolExecutionContext, ToolExecutionResult, ToolRuntime};

use crate::{ChatError, ChatErrorPhase};

#[derive(Clone)]
pub struct ToolOrchestrator {
    completions: CompletionClient,
    runtime: Arc<dyn ToolRuntime>,
    model: String,
}

impl ToolOrchestrator {
    pub fn new(
        completions: CompletionClient,
        runtime: Arc<dyn ToolRuntime>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            completions,
            runtime,
            model: model.into(),
        }
    }

    /// Runs one tool-enabled turn over `messages` and returns the final text.
    ///
    /// Discovery and individual tool failures never fail the turn; submission
    /// and finalization failures do.
    pub async fn run(
        &self,
        messages: Vec<ChatMessage>,
        context: ToolExecutionContext,
    ) -> Result<String, ChatError> {
        self.run_inner(messages, context)
            .await
            .map_err(|error| error.within(ChatErrorPhase::ToolEnabled))
    }

    async fn run_inner(
        &self,
        messages: Vec<ChatMessage>,
        context: ToolExecutionContext,
    ) -> Result<String, ChatError> {
        let tools = self.runtime.discover(&context.toolkits).await;

        let request = ChatCompletionRequest::builder(self.model.clone())
            .messages(messages.iter().cloned())
            .required_tools(tools)
            .build()?;
        let completion = self.completions.chat_completion(request).await?;
        let message = completion
            .message
            .ok_or_else(|| ProviderError::empty_response("No message in response"))?;

        if !message.has_tool_calls() {
            return Ok(message.content.unwrap_or_default());
        }

        let mut transcript = messages
            .into_iter()
            .map(CompletionMessage::from)
            .collect::<Vec<_>>();
        transcript.push(CompletionMessage::AssistantToolCalls {
            content: message.content,
            tool_calls: message.tool_calls.clone(),
        });

        for tool_call in message.tool_calls {
            let result = match self.runtime.execute(tool_call.clone(), context.clone()).await {
                Ok(result) => result,
                Err(error) => ToolExecutionResult::from_error(&tool_call, &error),
            };
            transcript.push(result.into_message());
        }

        let final_request = ChatCompletionRequest::builder(self.model.clone())
            .messages(transcript)
            .build()?;
        let final_completion = self.completions.chat_completion(final_request).await?;

        Ok(final_completion.content().to_string())
    }
}
