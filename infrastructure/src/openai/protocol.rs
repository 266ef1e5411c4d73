//! Wire types for the Chat Completions API

use askdata_application::{CompletionRequest, GatewayError};
use askdata_domain::Message;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`
#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f32,
    pub max_tokens: u32,
    /// Exactly one completion per request
    pub n: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn from_request(request: &'a CompletionRequest, max_tokens: u32) -> Self {
        Self {
            model: request.model.as_str(),
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens,
            n: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Pull the completion text out of a successful response body.
pub(super) fn parse_completion(body: &str) -> Result<String, GatewayError> {
    if let Some(error) = parse_api_error(body) {
        return Err(error);
    }

    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".to_string()))?;

    choice
        .message
        .content
        .ok_or_else(|| GatewayError::MalformedResponse("choice has no content".to_string()))
}

/// Map a non-2xx status to a gateway error, preferring the API's own message.
pub(super) fn status_error(status: u16, body: &str) -> GatewayError {
    match parse_api_error(body) {
        Some(error) => error,
        None => GatewayError::HttpStatus {
            status,
            body: body.to_string(),
        },
    }
}

fn parse_api_error(body: &str) -> Option<GatewayError> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let message = match envelope.error.kind {
        Some(kind) => format!("{} ({})", envelope.error.message, kind),
        None => envelope.error.message,
    };
    Some(GatewayError::ApiError(message))
}
