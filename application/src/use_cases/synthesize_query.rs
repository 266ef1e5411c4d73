//! Synthesize Query use case
//!
//! Asks the backend for a new SQL query and keeps it only if it parses.
//! The query is never executed.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::error::AnalysisError;
use crate::use_cases::shared::StageClient;
use askdata_domain::{AnalysisPromptTemplate, GeneratedQuery, Question, Stage};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Use case for the query synthesis stage
///
/// Only meaningful after the question was classified as partially feasible.
pub struct SynthesizeQueryUseCase<G: LlmGateway + 'static> {
    client: StageClient<G>,
}

impl<G: LlmGateway + 'static> SynthesizeQueryUseCase<G> {
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

    pub async fn execute(
        &self,
        question: &Question,
        context: &str,
    ) -> Result<GeneratedQuery, AnalysisError> {
        self.execute_cancellable(question, context, None).await
    }

    pub async fn execute_cancellable(
        &self,
        question: &Question,
        context: &str,
        cancellation: Option<&CancellationToken>,
    ) -> Result<GeneratedQuery, AnalysisError> {
        let messages =
            AnalysisPromptTemplate::query_synthesis_messages(question.content(), context);
        let raw = self
            .client
            .ask(Stage::QuerySynthesis, messages, cancellation)
            .await?;

        let query = GeneratedQuery::from_response(&raw, &self.client.params().dialect)
            .map_err(|e| self.client.reject(Stage::QuerySynthesis, e))?;
        info!(
            "Synthesized query with {} statement(s)",
            query.statement_count()
        );
        Ok(query)
    }
}
