//! Error type shared by the analysis use cases

use crate::ports::llm_gateway::GatewayError;
use askdata_domain::{ChartSelectionError, ClassificationError, QuerySynthesisError};
use thiserror::Error;

/// Errors that end a question/answer cycle
///
/// Validation failures (the backend answered, but not acceptably) and
/// backend failures (no usable answer at all) stay distinct so that callers
/// can decide whether retrying makes sense.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Chart selection failed: {0}")]
    ChartSelection(#[from] ChartSelectionError),

    #[error("Query synthesis failed: {0}")]
    QuerySynthesis(#[from] QuerySynthesisError),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[from] GatewayError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Only backend failures are worth retrying; the same prompt tends to
    /// produce the same invalid answer at temperature 0.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::BackendUnavailable(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnalysisError::Cancelled)
    }

    /// The backend text that failed validation, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AnalysisError::Classification(e) => Some(e.raw()),
            AnalysisError::ChartSelection(e) => Some(e.raw()),
            AnalysisError::QuerySynthesis(e) => Some(e.raw()),
            AnalysisError::BackendUnavailable(_) | AnalysisError::Cancelled => None,
        }
    }

    /// Human-readable reason, without the raw response
    pub fn reason(&self) -> String {
        match self {
            AnalysisError::Classification(e) => e.reason().to_string(),
            AnalysisError::ChartSelection(e) => e.reason(),
            AnalysisError::QuerySynthesis(e) => e.reason(),
            AnalysisError::BackendUnavailable(e) => e.to_string(),
            AnalysisError::Cancelled => "operation cancelled".to_string(),
        }
    }
}
