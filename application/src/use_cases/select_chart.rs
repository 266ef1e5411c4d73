//! Select Chart use case
//!
//! Maps a feasible question to one of the two precomputed charts.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::error::AnalysisError;
use crate::use_cases::shared::StageClient;
use askdata_domain::{AnalysisPromptTemplate, ChartId, Question, Stage};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Use case for the chart selection stage
///
/// Only meaningful after the question was classified as feasible.
pub struct SelectChartUseCase<G: LlmGateway + 'static> {
    client: StageClient<G>,
}

impl<G: LlmGateway + 'static> SelectChartUseCase<G> {
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

    pub async fn execute(&self, question: &Question, context: &str) -> Result<ChartId, AnalysisError> {
        self.execute_cancellable(question, context, None).await
    }

    pub async fn execute_cancellable(
        &self,
        question: &Question,
        context: &str,
        cancellation: Option<&CancellationToken>,
    ) -> Result<ChartId, AnalysisError> {
        let messages =
            AnalysisPromptTemplate::chart_selection_messages(question.content(), context);
        let raw = self
            .client
            .ask(Stage::ChartSelection, messages, cancellation)
            .await?;

        let chart = ChartId::parse_response(&raw)
            .map_err(|e| self.client.reject(Stage::ChartSelection, e))?;
        info!("Selected chart {} ({})", chart, chart.title());
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::mock::ScriptedGateway;
    use askdata_domain::ChartSelectionFailure;

    const CONTEXT: &str = "Costs (datetime, category, amount)";

    async fn select(raw: &str) -> Result<ChartId, AnalysisError> {
        let gateway = Arc::new(ScriptedGateway::new([raw]));
        SelectChartUseCase::new(gateway, AnalysisParams::default())
            .execute(&Question::new("Total logistics cost?"), CONTEXT)
            .await
    }

    #[tokio::test]
    async fn test_one_and_two_are_accepted() {
        assert_eq!(select("1").await.unwrap(), ChartId::RevenueOverTime);
        assert_eq!(select("2").await.unwrap(), ChartId::CostBreakdown);
    }

    #[tokio::test]
    async fn test_invalid_responses_fail() {
        for raw in ["3", "one", "", "2.5", "Chart 2"] {
            let err = select(raw).await.unwrap_err();
            assert!(matches!(err, AnalysisError::ChartSelection(_)), "{raw:?}");
            assert_eq!(err.raw_response(), Some(raw));
        }
    }

    #[tokio::test]
    async fn test_out_of_range_reason() {
        let AnalysisError::ChartSelection(e) = select("3").await.unwrap_err() else {
            panic!("expected chart selection error");
        };
        assert_eq!(e.failure(), ChartSelectionFailure::OutOfRange(3));
    }

    #[tokio::test]
    async fn test_prompt_uses_chart_instructions() {
        let gateway = Arc::new(ScriptedGateway::new(["2"]));
        SelectChartUseCase::new(Arc::clone(&gateway), AnalysisParams::default())
            .execute(&Question::new("Total logistics cost?"), CONTEXT)
            .await
            .unwrap();
        let requests = gateway.requests();
        assert!(requests[0].messages[2].content.contains("sql query 2"));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_idempotent() {
        let gateway = Arc::new(ScriptedGateway::repeating("1"));
        let use_case = SelectChartUseCase::new(Arc::clone(&gateway), AnalysisParams::default());
        let question = Question::new("What was our revenue last quarter?");

        let first = use_case.execute(&question, CONTEXT).await.unwrap();
        let second = use_case.execute(&question, CONTEXT).await.unwrap();
        assert_eq!(first, ChartId::RevenueOverTime);
        assert_eq!(first, second);

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }
}
