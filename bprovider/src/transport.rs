//! reqwest-based HTTP implementation of [`ProxyTransport`].

use reqwest::{Client, Response, StatusCode};

use crate::serde_api::extract_error_message;
use crate::{ProviderError, ProviderFuture, ProxyEnvelope, ProxyRequest, ProxyTransport, SecretString};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ProxyHttpTransport {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ProxyHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_PROXY_URL.to_string(),
            token: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token).filter(|token| !token.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/proxy", self.base_url.trim_end_matches('/'))
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("proxy request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

impl ProxyTransport for ProxyHttpTransport {
    fn call<'a>(
        &'a self,
        request: ProxyRequest,
    ) -> ProviderFuture<'a, Result<ProxyEnvelope, ProviderError>> {
        Box::pin(async move {
            let mut builder = self.client.post(self.endpoint()).json(&request);
            if let Some(token) = &self.token {
                builder = builder.bearer_auth(token.expose());
            }

            let response = builder.send().await.map_err(|err| {
                if err.is_timeout() {
                    ProviderError::timeout(err.to_string())
                } else {
                    ProviderError::transport(err.to_string())
                }
            })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            response
                .json::<ProxyEnvelope>()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))
        })
    }
}
