//! OpenAI-compatible Chat Completions adapter
//!
//! Implements the [`LlmGateway`](askdata_application::LlmGateway) port over
//! HTTPS with `reqwest`. Any server speaking the `/v1/chat/completions`
//! protocol can be used by changing the base URL.

mod gateway;
mod protocol;

pub use gateway::OpenAiGateway;
