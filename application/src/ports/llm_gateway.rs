//! LLM Gateway port
//!
//! Defines the interface for sending chat completion requests to a language
//! model backend.

use askdata_domain::{Message, Model};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while talking to the backend.
///
/// These are transport-level failures. A backend that answers with text the
/// stages cannot accept is a validation failure, reported separately.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: Model, messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            model,
            messages,
            temperature,
        }
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer. A gateway
/// holds only read-only client configuration, so one instance can serve
/// any number of concurrent questions.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the messages and return the text of the single completion
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
