//! Shared plumbing for the stage use cases.
//!
//! [`StageClient`] owns everything a stage needs to issue one backend call:
//! the gateway, the analysis parameters and the conversation logger. It
//! checks cancellation, races the call against the cancellation token and
//! records the exchange.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::use_cases::error::AnalysisError;
use askdata_domain::{Message, Stage, preview};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const LOG_PREVIEW_LEN: usize = 200;

/// Check if cancellation has been requested.
pub(crate) fn check_cancelled(token: Option<&CancellationToken>) -> Result<(), AnalysisError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(AnalysisError::Cancelled);
    }
    Ok(())
}

/// Backend access shared by the three stages
pub(crate) struct StageClient<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: AnalysisParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> Clone for StageClient<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            params: self.params.clone(),
            logger: Arc::clone(&self.logger),
        }
    }
}

impl<G: LlmGateway + 'static> StageClient<G> {
    pub(crate) fn new(gateway: Arc<G>, params: AnalysisParams) -> Self {
        Self {
            gateway,
            params,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub(crate) fn set_logger(&mut self, logger: Arc<dyn ConversationLogger>) {
        self.logger = logger;
    }

    pub(crate) fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Send one stage's messages and return the raw completion text.
    pub(crate) async fn ask(
        &self,
        stage: Stage,
        messages: Vec<Message>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<String, AnalysisError> {
        check_cancelled(cancellation)?;

        let request = CompletionRequest::new(
            self.params.model.clone(),
            messages,
            self.params.temperature,
        );
        self.logger.log(ConversationEvent::new(
            "llm_request",
            serde_json::json!({
                "stage": stage.as_str(),
                "model": request.model.as_str(),
                "temperature": request.temperature,
                "messages": request.messages,
            }),
        ));

        let result = match cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(AnalysisError::Cancelled),
                result = self.gateway.complete(&request) => result,
            },
            None => self.gateway.complete(&request).await,
        };

        match result {
            Ok(text) => {
                debug!(
                    "{} response from {}: {}",
                    stage,
                    request.model,
                    preview(&text, LOG_PREVIEW_LEN)
                );
                self.logger.log(ConversationEvent::new(
                    "llm_response",
                    serde_json::json!({
                        "stage": stage.as_str(),
                        "model": request.model.as_str(),
                        "text": text,
                    }),
                ));
                Ok(text)
            }
            Err(e) => {
                warn!("{} backend call failed: {}", stage, e);
                self.logger.log(ConversationEvent::new(
                    "llm_error",
                    serde_json::json!({
                        "stage": stage.as_str(),
                        "model": request.model.as_str(),
                        "error": e.to_string(),
                    }),
                ));
                Err(AnalysisError::BackendUnavailable(e))
            }
        }
    }

    /// Record a validation failure and hand the error back.
    pub(crate) fn reject(&self, stage: Stage, error: impl Into<AnalysisError>) -> AnalysisError {
        let error = error.into();
        warn!("{} response rejected: {}", stage, error);
        self.logger.log(ConversationEvent::new(
            "validation_failed",
            serde_json::json!({
                "stage": stage.as_str(),
                "reason": error.reason(),
                "raw": error.raw_response(),
            }),
        ));
        error
    }
}
