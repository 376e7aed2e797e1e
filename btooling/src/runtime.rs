//! Tool runtime trait and the broker-backed executor with authorization flow.

use std::sync::Arc;
use std::time::Instant;

use bprovider::{ToolCallRequest, ToolSpec};
use futures_timer::Delay;

use crate::{
    AuthorizationPolicy, AuthorizationPrompt, AuthorizationStatus, BrokerExecution,
    NoopAuthorizationPrompt, NoopToolRuntimeHooks, ToolBroker, ToolError, ToolExecutionContext,
    ToolExecutionResult, ToolFuture, ToolName, ToolRuntimeHooks, parse_tool_arguments,
};

pub const AUTHORIZATION_NOT_COMPLETED: &str = "Authorization was not completed";

pub trait ToolRuntime: Send + Sync {
    /// Lists tools for each toolkit in order, skipping toolkits that fail.
    fn discover<'a>(&'a self, toolkits: &'a [String]) -> ToolFuture<'a, Vec<ToolSpec>>;

    fn execute<'a>(
        &'a self,
        tool_call: ToolCallRequest,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;
}

#[derive(Clone)]
pub struct BrokerToolRuntime {
    broker: Arc<dyn ToolBroker>,
    prompt: Arc<dyn AuthorizationPrompt>,
    policy: AuthorizationPolicy,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl BrokerToolRuntime {
    pub fn new(broker: Arc<dyn ToolBroker>) -> Self {
        Self {
            broker,
            prompt: Arc::new(NoopAuthorizationPrompt),
            policy: AuthorizationPolicy::default(),
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn AuthorizationPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_policy(mut self, policy: AuthorizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    async fn run(&self, tool_call: &ToolCallRequest) -> Result<String, ToolError> {
        let tool_name = ToolName::from_model_name(&tool_call.name).to_execution_name();
        let input = parse_tool_arguments(&tool_call.arguments)?;
        let mut retries = 0;

        loop {
            match self.broker.execute_tool(&tool_name, input.clone()).await? {
                BrokerExecution::Output(output) => return Ok(output),
                BrokerExecution::AuthorizationRequired if retries < self.policy.max_retries => {
                    self.authorize(tool_call, &tool_name).await?;
                    retries += 1;
                }
                BrokerExecution::AuthorizationRequired => {
                    return Err(ToolError::authorization_required(format!(
                        "tool '{tool_name}' still requires authorization"
                    )));
                }
            }
        }
    }

    async fn authorize(&self, tool_call: &ToolCallRequest, tool_name: &str) -> Result<(), ToolError> {
        let handshake = self.broker.authorize_tool(tool_name).await?;
        self.hooks.on_authorization_required(tool_call, &handshake);

        if handshake.status.is_completed() {
            return Ok(());
        }

        if let Some(url) = &handshake.url {
            self.prompt.present(tool_name, url);
        }

        let mut polls = 0;
        loop {
            polls += 1;
            match self.broker.wait_for_auth_completion(&handshake.id).await? {
                AuthorizationStatus::Completed => return Ok(()),
                AuthorizationStatus::Pending if polls < self.policy.max_polls => {
                    Delay::new(self.policy.poll_interval).await;
                }
                _ => return Err(ToolError::authorization_incomplete(AUTHORIZATION_NOT_COMPLETED)),
            }
        }
    }
}

impl ToolRuntime for BrokerToolRuntime {
    fn discover<'a>(&'a self, toolkits: &'a [String]) -> ToolFuture<'a, Vec<ToolSpec>> {
        Box::pin(async move {
            let mut tools = Vec::new();
            for toolkit in toolkits {
                match self.broker.formatted_tools(toolkit).await {
                    Ok(specs) => tools.extend(specs),
                    Err(error) => self.hooks.on_toolkit_discovery_failed(toolkit, &error),
                }
            }

            tools
        })
    }

    fn execute<'a>(
        &'a self,
        tool_call: ToolCallRequest,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            let started = Instant::now();
            self.hooks.on_execution_start(&tool_call, &context);

            match self.run(&tool_call).await {
                Ok(output) => {
                    let result = ToolExecutionResult::from_call(&tool_call, output);
                    self.hooks
                        .on_execution_success(&tool_call, &context, &result, started.elapsed());
                    Ok(result)
                }
                Err(error) => {
                    let error = error
                        .with_tool_name(tool_call.name.clone())
                        .with_tool_call_id(tool_call.call_id.clone());
                    self.hooks
                        .on_execution_failure(&tool_call, &context, &error, started.elapsed());
                    Err(error)
                }
            }
        })
    }
}
