//! Proxy envelope types and the transport contract for outbound service calls.
//!
//! Every call to the completion service or the toolkit broker goes through an
//! intermediating proxy that accepts `{service, operation, payload}` and answers
//! with a `{success, data}` envelope.
//!
//! ```rust
//! use bprovider::{ProxyRequest, ProxyService};
//! use serde_json::json;
//!
//! let request = ProxyRequest::new(ProxyService::Arcade, "execute_tool", json!({"tool_name": "Math.Sqrt"}));
//! let body = serde_json::to_value(&request).expect("request should serialize");
//! assert_eq!(body["service"], "arcade");
//! assert_eq!(body["operation"], "execute_tool");
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyService {
    OpenAi,
    Arcade,
}

impl Display for ProxyService {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::OpenAi => "openai",
            Self::Arcade => "arcade",
        };

        f.write_str(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyRequest {
    pub service: ProxyService,
    pub operation: String,
    pub payload: Value,
}

impl ProxyRequest {
    pub fn new(service: ProxyService, operation: impl Into<String>, payload: Value) -> Self {
        Self {
            service,
            operation: operation.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProxyEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ProxyEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }

    pub fn failed(data: Value) -> Self {
        Self {
            success: false,
            data: Some(data),
        }
    }

    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
        }
    }

    /// Best-effort message out of a failed envelope's data.
    pub fn failure_message(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        if let Some(message) = data.as_str() {
            return Some(message.to_string());
        }

        data.get("error")
            .and_then(|error| {
                error
                    .as_str()
                    .map(ToString::to_string)
                    .or_else(|| error.get("message").and_then(Value::as_str).map(String::from))
            })
            .or_else(|| data.get("message").and_then(Value::as_str).map(String::from))
    }
}

pub trait ProxyTransport: Send + Sync + std::fmt::Debug {
    fn call<'a>(
        &'a self,
        request: ProxyRequest,
    ) -> ProviderFuture<'a, Result<ProxyEnvelope, ProviderError>>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_deserializes_with_and_without_data() {
        let full: ProxyEnvelope =
            serde_json::from_value(json!({"success": true, "data": {"id": "r1"}}))
                .expect("envelope should parse");
        assert!(full.success);
        assert_eq!(full.data, Some(json!({"id": "r1"})));

        let bare: ProxyEnvelope =
            serde_json::from_value(json!({"success": false})).expect("envelope should parse");
        assert!(!bare.success);
        assert!(bare.data.is_none());

        let null: ProxyEnvelope = serde_json::from_value(json!({"success": true, "data": null}))
            .expect("envelope should parse");
        assert!(null.data.is_none());
    }

    #[test]
    fn failure_message_prefers_error_fields() {
        let nested = ProxyEnvelope::failed(json!({"error": {"message": "quota exceeded"}}));
        assert_eq!(nested.failure_message().as_deref(), Some("quota exceeded"));

        let flat = ProxyEnvelope::failed(json!({"error": "tool crashed"}));
        assert_eq!(flat.failure_message().as_deref(), Some("tool crashed"));

        let message = ProxyEnvelope::failed(json!({"message": "bad gateway"}));
        assert_eq!(message.failure_message().as_deref(), Some("bad gateway"));

        assert_eq!(ProxyEnvelope::empty().failure_message(), None);
    }
}
