//! Analyze Question use case
//!
//! Drives one question through the decision sequence:
//!
//! ```text
//! feasibility ─┬─ feasible           → chart selection → ChartReady
//!              ├─ partially feasible → query synthesis → QueryReady
//!              └─ not feasible       → NotAnswerable
//! ```
//!
//! At most two backend calls are made per question. Any stage failure ends
//! the cycle immediately; nothing is retried.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::use_cases::classify_feasibility::ClassifyFeasibilityUseCase;
use crate::use_cases::error::AnalysisError;
use crate::use_cases::select_chart::SelectChartUseCase;
use crate::use_cases::shared::{StageClient, check_cancelled};
use crate::use_cases::synthesize_query::SynthesizeQueryUseCase;
use askdata_domain::{
    AnalysisOutcome, AnalysisReport, FeasibilityLabel, Question, Stage, truncate,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Input for the [`AnalyzeQuestionUseCase`]
#[derive(Debug, Clone)]
pub struct AnalyzeQuestionInput {
    pub question: Question,
    /// Rendered data context sent as the system message of every stage
    pub context: String,
    pub cancellation: Option<CancellationToken>,
}

impl AnalyzeQuestionInput {
    pub fn new(question: impl Into<Question>, context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Use case for answering one business question
pub struct AnalyzeQuestionUseCase<G: LlmGateway + 'static> {
    classify: ClassifyFeasibilityUseCase<G>,
    select_chart: SelectChartUseCase<G>,
    synthesize: SynthesizeQueryUseCase<G>,
    logger: Option<Arc<dyn ConversationLogger>>,
}

impl<G: LlmGateway + 'static> AnalyzeQuestionUseCase<G> {
    pub fn new(gateway: Arc<G>, params: AnalysisParams) -> Self {
        Self::from_client(StageClient::new(gateway, params), None)
    }

    fn from_client(client: StageClient<G>, logger: Option<Arc<dyn ConversationLogger>>) -> Self {
        Self {
            classify: ClassifyFeasibilityUseCase::from_client(client.clone()),
            select_chart: SelectChartUseCase::from_client(client.clone()),
            synthesize: SynthesizeQueryUseCase::from_client(client),
            logger,
        }
    }

    /// Record every backend exchange with `logger`
    pub fn with_logger(self, logger: Arc<dyn ConversationLogger>) -> Self {
        Self {
            classify: self.classify.with_logger(Arc::clone(&logger)),
            select_chart: self.select_chart.with_logger(Arc::clone(&logger)),
            synthesize: self.synthesize.with_logger(Arc::clone(&logger)),
            logger: Some(logger),
        }
    }

    pub async fn execute(&self, input: AnalyzeQuestionInput) -> Result<AnalysisReport, AnalysisError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: AnalyzeQuestionInput,
        progress: &dyn StageProgressNotifier,
    ) -> Result<AnalysisReport, AnalysisError> {
        let AnalyzeQuestionInput {
            question,
            context,
            cancellation,
        } = input;
        let cancellation = cancellation.as_ref();
        info!("Analyzing question: {}", truncate(question.content(), 100));
        if question.is_blank() {
            debug!("Question is blank; leaving it to the feasibility stage");
        }
        check_cancelled(cancellation)?;

        progress.on_stage_start(Stage::Feasibility);
        let label = self
            .classify
            .execute_cancellable(&question, &context, cancellation)
            .await;
        progress.on_stage_complete(Stage::Feasibility, label.is_ok());
        let label = label?;
        progress.on_feasibility(label);

        let outcome = match label {
            FeasibilityLabel::Feasible => {
                progress.on_stage_start(Stage::ChartSelection);
                let chart = self
                    .select_chart
                    .execute_cancellable(&question, &context, cancellation)
                    .await;
                progress.on_stage_complete(Stage::ChartSelection, chart.is_ok());
                AnalysisOutcome::ChartReady { chart: chart? }
            }
            FeasibilityLabel::PartiallyFeasible => {
                progress.on_stage_start(Stage::QuerySynthesis);
                let query = self
                    .synthesize
                    .execute_cancellable(&question, &context, cancellation)
                    .await;
                progress.on_stage_complete(Stage::QuerySynthesis, query.is_ok());
                AnalysisOutcome::QueryReady { query: query? }
            }
            FeasibilityLabel::NotFeasible => AnalysisOutcome::NotAnswerable,
        };

        let report = AnalysisReport::new(question, label, outcome);
        if let Some(logger) = &self.logger {
            logger.log(ConversationEvent::new(
                "analysis_complete",
                serde_json::to_value(&report).unwrap_or_default(),
            ));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::mock::{PendingGateway, ScriptedGateway};
    use askdata_domain::{ChartId, DataCatalog};
    use std::sync::Mutex;

    fn context() -> String {
        DataCatalog::ecommerce().render()
    }

    fn use_case(gateway: &Arc<ScriptedGateway>) -> AnalyzeQuestionUseCase<ScriptedGateway> {
        AnalyzeQuestionUseCase::new(Arc::clone(gateway), AnalysisParams::default())
    }

    async fn analyze(
        responses: Vec<Result<String, GatewayError>>,
        question: &str,
    ) -> (Result<AnalysisReport, AnalysisError>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::from_results(responses));
        let result = use_case(&gateway)
            .execute(AnalyzeQuestionInput::new(question, context()))
            .await;
        (result, gateway)
    }

    fn ok(text: &str) -> Result<String, GatewayError> {
        Ok(text.to_string())
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl StageProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: Stage) {
            self.events.lock().unwrap().push(format!("start:{}", stage));
        }

        fn on_stage_complete(&self, stage: Stage, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("complete:{}:{}", stage, success));
        }

        fn on_feasibility(&self, label: FeasibilityLabel) {
            self.events.lock().unwrap().push(format!("label:{}", label));
        }
    }

    #[tokio::test]
    async fn test_revenue_question_selects_revenue_chart() {
        let (result, gateway) =
            analyze(vec![ok("feasible"), ok("1")], "What was our revenue last quarter?").await;
        let report = result.unwrap();
        assert_eq!(report.feasibility, FeasibilityLabel::Feasible);
        assert_eq!(report.outcome.chart(), Some(ChartId::RevenueOverTime));
        assert_eq!(gateway.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_feasible_question_selects_chart() {
        let (result, gateway) =
            analyze(vec![ok("feasible"), ok("2")], "What is our total logistics cost?").await;
        let report = result.unwrap();
        assert_eq!(report.feasibility, FeasibilityLabel::Feasible);
        assert_eq!(report.outcome.chart(), Some(ChartId::CostBreakdown));
        assert_eq!(gateway.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_partially_feasible_question_synthesizes_query() {
        let (result, gateway) = analyze(
            vec![
                ok("partially feasible"),
                ok("```sql\nSELECT AVG(amount) FROM Tax WHERE is_paid = TRUE;\n```"),
            ],
            "What is our average monthly tax paid in 2023?",
        )
        .await;
        let report = result.unwrap();
        assert_eq!(report.feasibility, FeasibilityLabel::PartiallyFeasible);
        assert_eq!(
            report.outcome.query().unwrap().sql(),
            "SELECT AVG(amount) FROM Tax WHERE is_paid = TRUE;"
        );
        assert_eq!(gateway.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_not_feasible_question_makes_one_call() {
        let (result, gateway) = analyze(
            vec![ok("not feasible"), ok("1")],
            "What will our revenue be next year?",
        )
        .await;
        let report = result.unwrap();
        assert_eq!(report.outcome, AnalysisOutcome::NotAnswerable);
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_question_reaches_classifier() {
        let (result, gateway) = analyze(vec![ok("not feasible")], "  ").await;
        assert_eq!(result.unwrap().outcome, AnalysisOutcome::NotAnswerable);
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].messages[1].content.ends_with("questions:   "));
    }

    #[tokio::test]
    async fn test_invalid_label_stops_before_second_stage() {
        let (result, gateway) = analyze(vec![ok("maybe"), ok("1")], "Revenue?").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AnalysisError::Classification(_)));
        assert_eq!(err.raw_response(), Some("maybe"));
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fractional_chart_number_fails() {
        let (result, _) = analyze(vec![ok("feasible"), ok("2.5")], "Revenue by month?").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AnalysisError::ChartSelection(_)));
        assert_eq!(err.raw_response(), Some("2.5"));
    }

    #[tokio::test]
    async fn test_unparseable_query_fails() {
        let (result, _) = analyze(
            vec![ok("partially feasible"), ok("Sorry, I cannot help with that.")],
            "Tax by region?",
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            AnalysisError::QuerySynthesis(_)
        ));
    }

    #[tokio::test]
    async fn test_backend_error_in_second_stage_is_reported_as_unavailable() {
        let (result, _) = analyze(
            vec![ok("feasible"), Err(GatewayError::Timeout)],
            "Revenue over time?",
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::BackendUnavailable(GatewayError::Timeout)
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_same_context_and_question_for_both_stages() {
        let (_, gateway) = analyze(vec![ok("feasible"), ok("1")], "Revenue over time?").await;
        let requests = gateway.requests();
        assert_eq!(requests[0].messages[0], requests[1].messages[0]);
        assert_eq!(requests[0].messages[1], requests[1].messages[1]);
        assert_ne!(requests[0].messages[2], requests[1].messages[2]);
    }

    #[tokio::test]
    async fn test_repeated_analysis_is_idempotent() {
        let gateway = Arc::new(ScriptedGateway::from_results(vec![
            ok("feasible"),
            ok("1"),
            ok("feasible"),
            ok("1"),
        ]));
        let use_case = use_case(&gateway);
        let first = use_case
            .execute(AnalyzeQuestionInput::new("Revenue over time?", context()))
            .await
            .unwrap();
        let second = use_case
            .execute(AnalyzeQuestionInput::new("Revenue over time?", context()))
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.outcome.chart(), Some(ChartId::RevenueOverTime));
    }

    #[tokio::test]
    async fn test_progress_events_follow_stages() {
        let gateway = Arc::new(ScriptedGateway::new(["partially feasible", "SELECT 1"]));
        let progress = RecordingProgress::default();
        use_case(&gateway)
            .execute_with_progress(AnalyzeQuestionInput::new("Tax?", context()), &progress)
            .await
            .unwrap();
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                "start:feasibility",
                "complete:feasibility:true",
                "label:partially feasible",
                "start:query_synthesis",
                "complete:query_synthesis:true",
            ]
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let gateway = Arc::new(ScriptedGateway::new(["feasible", "1"]));
        let token = CancellationToken::new();
        token.cancel();
        let err = use_case(&gateway)
            .execute(AnalyzeQuestionInput::new("Revenue?", context()).with_cancellation(token))
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_pending_call() {
        let use_case = AnalyzeQuestionUseCase::new(Arc::new(PendingGateway), AnalysisParams::default());
        let token = CancellationToken::new();
        let input = AnalyzeQuestionInput::new("Revenue?", context()).with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = use_case.execute(input).await.unwrap_err();
        canceller.await.unwrap();
        assert!(matches!(err, AnalysisError::Cancelled));
    }
}
