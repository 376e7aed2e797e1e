//! Proxy, model, and authorization settings for a bridge runtime.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use bridgekit::BridgeConfig;
//!
//! let config = BridgeConfig::new("http://127.0.0.1:9000")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_model("gpt-4o");
//! assert_eq!(config.models.default_model, "gpt-4o");
//! assert_eq!(config.models.tool_model, "gpt-4o");
//! ```

use std::time::Duration;

use bchat::ChatPolicy;
use bprovider::{DEFAULT_PROXY_URL, ProviderError, SecretString};
use btooling::AuthorizationPolicy;

pub const PROXY_URL_ENV: &str = "BRIDGEKIT_PROXY_URL";
pub const PROXY_TOKEN_ENV: &str = "BRIDGEKIT_PROXY_TOKEN";
pub const TIMEOUT_SECS_ENV: &str = "BRIDGEKIT_TIMEOUT_SECS";
pub const MODEL_ENV: &str = "BRIDGEKIT_MODEL";

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub proxy_url: String,
    pub proxy_token: Option<SecretString>,
    /// Applied to every HTTP request to the proxy, including authorization polls.
    pub timeout: Duration,
    pub models: ChatPolicy,
    pub authorization: AuthorizationPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }
}

impl BridgeConfig {
    pub fn new(proxy_url: impl Into<String>) -> Self {
        Self {
            proxy_url: proxy_url.into(),
            proxy_token: None,
            timeout: Duration::from_secs(90),
            models: ChatPolicy::default(),
            authorization: AuthorizationPolicy::default(),
        }
    }

    pub fn with_proxy_token(mut self, token: impl Into<String>) -> Self {
        self.proxy_token = Some(SecretString::new(token)).filter(|token| !token.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses `model` for plain, stateful, and tool-enabled turns alike.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.models = ChatPolicy::with_model(model);
        self
    }

    pub fn with_models(mut self, models: ChatPolicy) -> Self {
        self.models = models;
        self
    }

    pub fn with_authorization(mut self, authorization: AuthorizationPolicy) -> Self {
        self.authorization = authorization;
        self
    }

    /// Reads `BRIDGEKIT_*` variables; unset or blank ones keep their defaults.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(proxy_url) = read(PROXY_URL_ENV) {
            config.proxy_url = proxy_url;
        }
        if let Some(token) = read(PROXY_TOKEN_ENV) {
            config = config.with_proxy_token(token);
        }
        if let Some(timeout) = read(TIMEOUT_SECS_ENV) {
            let seconds = timeout.parse::<u64>().map_err(|_| {
                ProviderError::invalid_request(format!(
                    "{TIMEOUT_SECS_ENV} must be a whole number of seconds, got '{timeout}'"
                ))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }
        if let Some(model) = read(MODEL_ENV) {
            config = config.with_model(model);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bprovider::ProviderErrorKind;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn defaults_match_local_proxy_and_default_model() {
        let config = BridgeConfig::from_lookup(|_| None).expect("empty environment is valid");

        assert_eq!(config.proxy_url, "http://localhost:8000");
        assert!(config.proxy_token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.models, ChatPolicy::default());
        assert_eq!(config.authorization.max_retries, 1);
    }

    #[test]
    fn environment_overrides_every_setting() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            (PROXY_URL_ENV, "http://bridge.internal:8080"),
            (PROXY_TOKEN_ENV, "token-123"),
            (TIMEOUT_SECS_ENV, " 15 "),
            (MODEL_ENV, "gpt-4o"),
        ]))
        .expect("environment should parse");

        assert_eq!(config.proxy_url, "http://bridge.internal:8080");
        assert_eq!(
            config.proxy_token.as_ref().map(SecretString::expose),
            Some("token-123")
        );
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.models.tool_model, "gpt-4o");
    }

    #[test]
    fn blank_values_are_ignored_and_bad_timeouts_rejected() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            (PROXY_TOKEN_ENV, "   "),
            (MODEL_ENV, ""),
        ]))
        .expect("blank values fall back to defaults");
        assert!(config.proxy_token.is_none());
        assert_eq!(config.models.default_model, "gpt-4o-mini");

        let error = BridgeConfig::from_lookup(lookup_from(&[(TIMEOUT_SECS_ENV, "soon")]))
            .expect_err("timeout must be numeric");
        assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    }
}
