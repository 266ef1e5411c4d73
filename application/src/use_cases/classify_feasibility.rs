//! Classify Feasibility use case
//!
//! Asks the backend whether a question can be answered from the
//! materialized results, from a new query, or not at all.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::error::AnalysisError;
use crate::use_cases::shared::StageClient;
use askdata_domain::{AnalysisPromptTemplate, FeasibilityLabel, Question, Stage};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Use case for the feasibility stage
pub struct ClassifyFeasibilityUseCase<G: LlmGateway + 'static> {
    client: StageClient<G>,
}

impl<G: LlmGateway + 'static> ClassifyFeasibilityUseCase<G> {
    pub fn new(gateway: Arc<G>, params: AnalysisParams) -> Self {
        Self {
            client: StageClient::new(gateway, params),
        }
    }

    pub(crate) fn from_client(client: StageClient<G>) -> Self {
        Self { client }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.client.set_logger(logger);
        self
    }

    /// Classify the question against the data context
    pub async fn execute(
        &self,
        question: &Question,
        context: &str,
    ) -> Result<FeasibilityLabel, AnalysisError> {
        self.execute_cancellable(question, context, None).await
    }

    /// Classify, giving up as soon as `cancellation` fires
    pub async fn execute_cancellable(
        &self,
        question: &Question,
        context: &str,
        cancellation: Option<&CancellationToken>,
    ) -> Result<FeasibilityLabel, AnalysisError> {
        let messages = AnalysisPromptTemplate::feasibility_messages(question.content(), context);
        let raw = self
            .client
            .ask(Stage::Feasibility, messages, cancellation)
            .await?;

        let label = FeasibilityLabel::parse_response(&raw)
            .map_err(|e| self.client.reject(Stage::Feasibility, e))?;
        info!("Question classified as {}", label);
        Ok(label)
    }
}
