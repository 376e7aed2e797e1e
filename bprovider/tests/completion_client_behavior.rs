use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bprovider::interpret;
use bprovider::{
    CompletionClient, ProviderError, ProviderErrorKind, ProviderFuture, ProviderOperationHooks,
    ProxyEnvelope, ProxyGateway, ProxyRequest, ProxyService, ProxyTransport, ResponsesRequest,
};
use serde_json::json;

#[derive(Debug, Default)]
struct FakeTransport {
    replies: Mutex<VecDeque<Result<ProxyEnvelope, ProviderError>>>,
    captured: Mutex<Vec<ProxyRequest>>,
}

impl FakeTransport {
    fn replying(replies: Vec<Result<ProxyEnvelope, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            captured: Mutex::new(Vec::new()),
        })
    }
}

impl ProxyTransport for FakeTransport {
    fn call<'a>(
        &'a self,
        request: ProxyRequest,
    ) -> ProviderFuture<'a, Result<ProxyEnvelope, ProviderError>> {
        Box::pin(async move {
            self.captured.lock().expect("captured lock").push(request);
            self.replies
                .lock()
                .expect("replies lock")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::other("transport script exhausted")))
        })
    }
}

#[derive(Debug, Default)]
struct CountingHooks {
    events: Mutex<Vec<String>>,
}

impl ProviderOperationHooks for CountingHooks {
    fn on_call_start(&self, service: ProxyService, operation: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("start:{service}:{operation}"));
    }

    fn on_call_success(&self, service: ProxyService, operation: &str, _elapsed: Duration) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success:{service}:{operation}"));
    }

    fn on_call_failure(
        &self,
        service: ProxyService,
        operation: &str,
        _elapsed: Duration,
        error: &ProviderError,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("failure:{service}:{operation}:{:?}", error.kind));
    }

    fn on_envelope_rejected(&self, service: ProxyService, operation: &str, message: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("rejected:{service}:{operation}:{message}"));
    }
}

#[tokio::test]
async fn continuation_request_round_trips_through_the_proxy() {
    let transport = FakeTransport::replying(vec![Ok(ProxyEnvelope::ok(json!({
        "id": "resp_2",
        "status": "completed",
        "output": [{
            "type": "message",
            "content": [{"type": "output_text", "text": "second answer", "annotations": []}]
        }]
    })))]);
    let hooks = Arc::new(CountingHooks::default());
    let client = CompletionClient::new(
        ProxyGateway::new(transport.clone()).with_hooks(hooks.clone()),
    );

    let response = client
        .responses_create(ResponsesRequest::continuation(
            "gpt-4o-mini",
            "resp_1",
            "follow up",
        ))
        .await
        .expect("responses call should succeed");
    let response = interpret::handle_error(Some(response)).expect("response is successful");

    assert_eq!(response.id.as_deref(), Some("resp_2"));
    assert_eq!(interpret::extract_text(&response), "second answer");

    let captured = transport.captured.lock().expect("captured lock");
    assert_eq!(captured[0].service, ProxyService::OpenAi);
    assert_eq!(captured[0].operation, "responses_create");
    assert_eq!(captured[0].payload["previous_response_id"], "resp_1");
    assert_eq!(captured[0].payload["input"], "follow up");

    let events = hooks.events.lock().expect("events lock");
    assert_eq!(
        events.as_slice(),
        ["start:openai:responses_create", "success:openai:responses_create"]
    );
}

#[tokio::test]
async fn failed_envelope_surfaces_as_api_error() {
    let transport = FakeTransport::replying(vec![Ok(ProxyEnvelope::failed(json!({
        "error": {"message": "invalid model"}
    })))]);
    let hooks = Arc::new(CountingHooks::default());
    let client =
        CompletionClient::new(ProxyGateway::new(transport).with_hooks(hooks.clone()));

    let error = client
        .responses_create(ResponsesRequest::seeded("gpt-x", None, "hi"))
        .await
        .expect_err("failed envelope must error");

    assert_eq!(error.kind, ProviderErrorKind::Api);
    assert_eq!(error.to_string(), "invalid model");
    // Envelope failures are decided after the transport succeeded.
    assert_eq!(
        hooks.events.lock().expect("events lock").as_slice(),
        [
            "start:openai:responses_create",
            "success:openai:responses_create",
            "rejected:openai:responses_create:invalid model",
        ]
    );
}

#[tokio::test]
async fn transport_failure_is_reported_once_without_retrying() {
    let transport = FakeTransport::replying(vec![
        Err(ProviderError::unavailable("proxy down")),
        Ok(ProxyEnvelope::ok(json!({}))),
    ]);
    let hooks = Arc::new(CountingHooks::default());
    let client = CompletionClient::new(
        ProxyGateway::new(transport.clone()).with_hooks(hooks.clone()),
    );

    let error = client
        .responses_create(ResponsesRequest::seeded("gpt-4o-mini", None, "hi"))
        .await
        .expect_err("transport error must surface");

    assert_eq!(error.kind, ProviderErrorKind::Unavailable);
    assert_eq!(transport.captured.lock().expect("captured lock").len(), 1);
    assert_eq!(
        hooks.events.lock().expect("events lock").as_slice(),
        [
            "start:openai:responses_create",
            "failure:openai:responses_create:Unavailable",
        ]
    );
}
