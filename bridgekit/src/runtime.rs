//! Runtime wiring: HTTP transport, proxy gateway, tool runtime, chat service.

use std::sync::Arc;

use bobserve::{SafeProviderHooks, SafeToolHooks, TracingObservabilityHooks};
use reqwest::Client;

use crate::{
    AuthorizationPrompt, BridgeConfig, BrokerToolRuntime, ChatService, CompletionClient,
    ProviderError, ProviderOperationHooks, ProxyGateway, ProxyHttpTransport, ProxyToolBroker,
    ProxyTransport, SessionStore, ToolRuntimeHooks,
};

/// Everything a bridge needs to serve `ask`, `chat`, and the structured operations.
#[derive(Clone)]
pub struct BridgeRuntime {
    pub gateway: ProxyGateway,
    pub chat: ChatService,
}

/// Optional collaborators; unset ones fall back to tracing-backed defaults.
#[derive(Default, Clone)]
pub struct RuntimeParts {
    pub store: Option<Arc<dyn SessionStore>>,
    pub provider_hooks: Option<Arc<dyn ProviderOperationHooks>>,
    pub tool_hooks: Option<Arc<dyn ToolRuntimeHooks>>,
    pub prompt: Option<Arc<dyn AuthorizationPrompt>>,
}

impl RuntimeParts {
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_provider_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.provider_hooks = Some(hooks);
        self
    }

    pub fn with_tool_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.tool_hooks = Some(hooks);
        self
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn AuthorizationPrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }
}

pub fn proxy_transport(config: &BridgeConfig) -> Result<ProxyHttpTransport, ProviderError> {
    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let transport = ProxyHttpTransport::new(http).with_base_url(config.proxy_url.clone());
    Ok(match &config.proxy_token {
        Some(token) => transport.with_token(token.clone()),
        None => transport,
    })
}

/// Builds a runtime that talks HTTP to the configured proxy.
pub fn build_runtime(config: BridgeConfig) -> Result<BridgeRuntime, ProviderError> {
    let transport = proxy_transport(&config)?;
    Ok(build_runtime_with(
        config,
        Arc::new(transport),
        RuntimeParts::default(),
    ))
}

pub fn build_runtime_with_transport(
    config: BridgeConfig,
    transport: Arc<dyn ProxyTransport>,
) -> BridgeRuntime {
    build_runtime_with(config, transport, RuntimeParts::default())
}

pub fn build_runtime_with(
    config: BridgeConfig,
    transport: Arc<dyn ProxyTransport>,
    parts: RuntimeParts,
) -> BridgeRuntime {
    let provider_hooks = parts
        .provider_hooks
        .unwrap_or_else(|| {
            Arc::new(SafeProviderHooks::new(TracingObservabilityHooks))
                as Arc<dyn ProviderOperationHooks>
        });
    let tool_hooks = parts
        .tool_hooks
        .unwrap_or_else(|| {
            Arc::new(SafeToolHooks::new(TracingObservabilityHooks)) as Arc<dyn ToolRuntimeHooks>
        });
    let prompt = parts
        .prompt
        .unwrap_or_else(|| Arc::new(TracingObservabilityHooks) as Arc<dyn AuthorizationPrompt>);

    let gateway = ProxyGateway::new(transport).with_hooks(provider_hooks);
    let tool_runtime = BrokerToolRuntime::new(Arc::new(ProxyToolBroker::new(gateway.clone())))
        .with_policy(config.authorization)
        .with_prompt(prompt)
        .with_hooks(tool_hooks);

    let mut chat = ChatService::builder(CompletionClient::new(gateway.clone()))
        .tool_runtime(Arc::new(tool_runtime))
        .policy(config.models);
    if let Some(store) = parts.store {
        chat = chat.store(store);
    }

    BridgeRuntime {
        gateway,
        chat: chat.build(),
    }
}
