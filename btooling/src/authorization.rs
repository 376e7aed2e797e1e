//! Out-of-band authorization handshake types and policy.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::ToolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationStatus {
    Completed,
    Pending,
    Failed,
    Other(String),
}

impl AuthorizationStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => Self::Completed,
            "pending" => Self::Pending,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHandshake {
    pub status: AuthorizationStatus,
    pub url: Option<String>,
    pub id: String,
}

impl AuthorizationHandshake {
    pub fn new(status: AuthorizationStatus, url: Option<String>, id: impl Into<String>) -> Self {
        Self {
            status,
            url,
            id: id.into(),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        let parsed: ApiHandshake = serde_json::from_value(value).map_err(|err| {
            ToolError::execution(format!("unexpected authorization response: {err}"))
        })?;

        Ok(Self {
            status: AuthorizationStatus::parse(&parsed.status),
            url: parsed.url.filter(|url| !url.is_empty()),
            id: parsed.id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiHandshake {
    status: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    id: String,
}

/// Bounds for the per-call authorization flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    /// Tool re-executions allowed after a successful authorization.
    pub max_retries: u32,
    /// Delay between `wait_for_auth_completion` calls that report pending.
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            poll_interval: Duration::from_secs(2),
            max_polls: 60,
        }
    }
}

impl AuthorizationPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls.max(1);
        self
    }
}

/// Presents an authorization URL to the user.
pub trait AuthorizationPrompt: Send + Sync {
    fn present(&self, tool_name: &str, url: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuthorizationPrompt;

impl AuthorizationPrompt for NoopAuthorizationPrompt {
    fn present(&self, _tool_name: &str, _url: &str) {}
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn handshake_decodes_pending_with_url() {
        let handshake = AuthorizationHandshake::from_value(json!({
            "status": "pending",
            "url": "https://auth.example/consent",
            "id": "auth_1"
        }))
        .expect("handshake decodes");

        assert_eq!(handshake.status, AuthorizationStatus::Pending);
        assert_eq!(handshake.url.as_deref(), Some("https://auth.example/consent"));
        assert_eq!(handshake.id, "auth_1");
    }

    #[test]
    fn handshake_tolerates_missing_url_and_id() {
        let handshake =
            AuthorizationHandshake::from_value(json!({"status": "completed", "url": ""}))
                .expect("handshake decodes");
        assert!(handshake.status.is_completed());
        assert_eq!(handshake.url, None);
        assert_eq!(handshake.id, "");

        assert!(AuthorizationHandshake::from_value(json!({"url": "x"})).is_err());
    }

    #[test]
    fn unknown_statuses_are_preserved() {
        assert_eq!(
            AuthorizationStatus::parse("expired"),
            AuthorizationStatus::Other("expired".to_string())
        );
    }

    #[test]
    fn default_policy_allows_one_retry() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.poll_interval, Duration::from_secs(2));
        assert_eq!(AuthorizationPolicy::default().with_max_polls(0).max_polls, 1);
    }
}
