//! Proxy gateway client and the completion-service operations built on it.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::serde_api::{
    build_chat_completion_payload, build_responses_payload, decode_chat_completion,
    decode_responses_object,
};
use crate::{
    ChatCompletion, ChatCompletionRequest, CompletionPayload, NoopOperationHooks, ProviderError,
    ProviderOperationHooks, ProxyEnvelope, ProxyRequest, ProxyService, ProxyTransport,
    ResponsesObject, ResponsesRequest,
};

pub const CHAT_COMPLETION_OPERATION: &str = "chat_completion";
pub const RESPONSES_CREATE_OPERATION: &str = "responses_create";

/// Sends `{service, operation, payload}` requests through a [`ProxyTransport`].
///
/// The gateway returns the raw envelope `data` on success. Envelope-level
/// failures are surfaced as errors here so callers never inspect `success`.
/// Each call is a single transport request; nothing is retried.
#[derive(Clone)]
pub struct ProxyGateway {
    transport: Arc<dyn ProxyTransport>,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl std::fmt::Debug for ProxyGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyGateway")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl ProxyGateway {
    pub fn new(transport: Arc<dyn ProxyTransport>) -> Self {
        Self {
            transport,
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Issues one proxy call and unwraps the envelope.
    ///
    /// `success: false` becomes an `Api` error carrying the best message found
    /// in `data`; a successful envelope without data becomes `EmptyResponse`.
    pub async fn call(
        &self,
        service: ProxyService,
        operation: &str,
        payload: Value,
    ) -> Result<Value, ProviderError> {
        let envelope = self.call_envelope(service, operation, payload).await?;
        if !envelope.success {
            let message = envelope
                .failure_message()
                .unwrap_or_else(|| "proxy reported failure".to_string());
            self.hooks.on_envelope_rejected(service, operation, &message);
            return Err(ProviderError::api(message));
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| ProviderError::empty_response("No data in proxy response"))
    }

    /// Issues one proxy call and hands back the envelope untouched.
    ///
    /// Used by callers that treat `success: false` as a meaningful outcome,
    /// such as tool execution reporting `auth_required`.
    pub async fn call_envelope(
        &self,
        service: ProxyService,
        operation: &str,
        payload: Value,
    ) -> Result<ProxyEnvelope, ProviderError> {
        self.hooks.on_call_start(service, operation);
        let started = Instant::now();

        match self
            .transport
            .call(ProxyRequest::new(service, operation, payload))
            .await
        {
            Ok(envelope) => {
                self.hooks
                    .on_call_success(service, operation, started.elapsed());
                Ok(envelope)
            }
            Err(error) => {
                self.hooks
                    .on_call_failure(service, operation, started.elapsed(), &error);
                Err(error)
            }
        }
    }
}

/// Completion-service operations: `chat_completion` and `responses_create`.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    gateway: ProxyGateway,
}

impl CompletionClient {
    pub fn new(gateway: ProxyGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ProxyGateway {
        &self.gateway
    }

    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletion, ProviderError> {
        match self
            .complete(CHAT_COMPLETION_OPERATION, build_chat_completion_payload(request)?)
            .await?
        {
            CompletionPayload::Chat(completion) => Ok(completion),
            CompletionPayload::Responses(_) => Err(ProviderError::other(
                "chat_completion returned a responses payload",
            )),
        }
    }

    pub async fn responses_create(
        &self,
        request: ResponsesRequest,
    ) -> Result<ResponsesObject, ProviderError> {
        match self
            .complete(RESPONSES_CREATE_OPERATION, build_responses_payload(request)?)
            .await?
        {
            CompletionPayload::Responses(response) => Ok(response),
            CompletionPayload::Chat(_) => Err(ProviderError::other(
                "responses_create returned a chat completion payload",
            )),
        }
    }

    /// Sends an already-encoded payload and decodes by operation.
    pub async fn complete(
        &self,
        operation: &str,
        payload: Value,
    ) -> Result<CompletionPayload, ProviderError> {
        let data = self
            .gateway
            .call(ProxyService::OpenAi, operation, payload)
            .await?;

        match operation {
            CHAT_COMPLETION_OPERATION => decode_chat_completion(data).map(CompletionPayload::Chat),
            RESPONSES_CREATE_OPERATION => {
                decode_responses_object(data).map(CompletionPayload::Responses)
            }
            other => Err(ProviderError::invalid_request(format!(
                "unsupported completion operation '{other}'"
            ))),
        }
    }
}
