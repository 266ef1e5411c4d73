//! Gateway implementation backed by `reqwest`

use super::protocol::{ChatCompletionRequest, parse_completion, status_error};
use crate::config::FileOpenAiConfig;
use askdata_application::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// LLM gateway speaking the OpenAI Chat Completions protocol
///
/// Holds a pooled HTTP client and read-only settings, so a single instance
/// can be shared across concurrent questions.
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
}

impl OpenAiGateway {
    /// Build a gateway from the `[providers.openai]` section.
    ///
    /// The key is taken from `api_key` when set, otherwise from the
    /// environment variable named by `api_key_env`.
    pub fn from_config(config: &FileOpenAiConfig, timeout: Duration) -> Result<Self, GatewayError> {
        let api_key = match &config.api_key {
            Some(key) if !key.trim().is_empty() => key.clone(),
            _ => std::env::var(&config.api_key_env)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    GatewayError::MissingCredentials(format!(
                        "set {} or providers.openai.api_key",
                        config.api_key_env
                    ))
                })?,
        };
        Self::new(&config.base_url, api_key, config.max_tokens, timeout)
    }

    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(base_url),
            api_key: api_key.into(),
            max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = base.strip_suffix("/v1").unwrap_or(base);
    format!("{}{}", base, COMPLETIONS_PATH)
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest::from_request(request, self.max_tokens);
        debug!(
            "POST {} (model: {}, {} messages)",
            self.endpoint,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }
        parse_completion(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_base_url() {
        assert_eq!(
            completions_endpoint("https://api.openai.com"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_endpoint("http://localhost:8080/"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let config = FileOpenAiConfig {
            api_key: Some("sk-test".to_string()),
            api_key_env: "ASKDATA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        let gateway = OpenAiGateway::from_config(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(gateway.api_key, "sk-test");
        assert_eq!(
            gateway.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = FileOpenAiConfig {
            api_key: None,
            api_key_env: "ASKDATA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OpenAiGateway::from_config(&config, Duration::from_secs(5)),
            Err(GatewayError::MissingCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_gateway_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let gateway =
            OpenAiGateway::new("http://127.0.0.1:9", "sk-test", 16, Duration::from_secs(2))
                .unwrap();
        let request = CompletionRequest::new(askdata_domain::Model::Gpt4o, vec![], 0.0);
        let err = gateway.complete(&request).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_)
                | GatewayError::RequestFailed(_)
                | GatewayError::Timeout
        ));
    }
}
