//! Terminal states of one question/answer cycle

use super::chart::ChartId;
use super::feasibility::FeasibilityLabel;
use super::query::GeneratedQuery;
use crate::core::question::Question;
use serde::{Deserialize, Serialize};

/// What the caller should show once the decision sequence has finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Show one of the precomputed charts
    ChartReady { chart: ChartId },
    /// Show a generated query as text (never executed)
    QueryReady { query: GeneratedQuery },
    /// Tell the user the data cannot answer the question
    NotAnswerable,
}

impl AnalysisOutcome {
    pub fn chart(&self) -> Option<ChartId> {
        match self {
            AnalysisOutcome::ChartReady { chart } => Some(*chart),
            _ => None,
        }
    }

    pub fn query(&self) -> Option<&GeneratedQuery> {
        match self {
            AnalysisOutcome::QueryReady { query } => Some(query),
            _ => None,
        }
    }
}

/// Full result of analysing a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub question: Question,
    pub feasibility: FeasibilityLabel,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

impl AnalysisReport {
    pub fn new(question: Question, feasibility: FeasibilityLabel, outcome: AnalysisOutcome) -> Self {
        Self {
            question,
            feasibility,
            outcome,
        }
    }
}
