//! Lifecycle hooks fired by [`ProxyGateway`](crate::ProxyGateway).
//!
//! Every gateway call makes exactly one transport request. Hooks see the start
//! of that request, its transport-level outcome, and envelopes the proxy
//! rejected with `success: false`.

use std::time::Duration;

use crate::{ProviderError, ProxyService};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_call_start(&self, _service: ProxyService, _operation: &str) {}

    fn on_call_success(&self, _service: ProxyService, _operation: &str, _elapsed: Duration) {}

    fn on_call_failure(
        &self,
        _service: ProxyService,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }

    /// The transport succeeded but the proxy reported `success: false`.
    fn on_envelope_rejected(&self, _service: ProxyService, _operation: &str, _message: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}
