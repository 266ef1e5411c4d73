//! Test doubles for the gateway port.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Gateway that replays scripted results and records every request
pub(crate) struct ScriptedGateway {
    results: Mutex<VecDeque<Result<String, GatewayError>>>,
    repeat: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub(crate) fn new<const N: usize>(responses: [&str; N]) -> Self {
        Self::from_results(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn from_results(results: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with the same text
    pub(crate) fn repeating(response: &str) -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            repeat: Some(response.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(text) = &self.repeat {
            return Ok(text.clone());
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Gateway that never answers
pub(crate) struct PendingGateway;

#[async_trait]
impl LlmGateway for PendingGateway {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
        std::future::pending().await
    }
}
