//! Feasibility label value object

use crate::core::error::ClassificationError;
use serde::{Deserialize, Serialize};

/// Whether a question can be answered from the available data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityLabel {
    /// One of the materialized queries already answers the question
    Feasible,
    /// A new query over the known tables can answer the question
    PartiallyFeasible,
    /// The available data cannot answer the question
    NotFeasible,
}

impl FeasibilityLabel {
    pub const ALL: [FeasibilityLabel; 3] = [
        FeasibilityLabel::Feasible,
        FeasibilityLabel::PartiallyFeasible,
        FeasibilityLabel::NotFeasible,
    ];

    /// The exact text the backend is asked to emit for this label
    pub fn as_str(&self) -> &'static str {
        match self {
            FeasibilityLabel::Feasible => "feasible",
            FeasibilityLabel::PartiallyFeasible => "partially feasible",
            FeasibilityLabel::NotFeasible => "not feasible",
        }
    }

    /// Parse a raw backend response into a label.
    ///
    /// Surrounding whitespace is ignored. Anything else (casing, trailing
    /// punctuation, extra words) is rejected.
    pub fn parse_response(raw: &str) -> Result<Self, ClassificationError> {
        let candidate = raw.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == candidate)
            .ok_or_else(|| ClassificationError::new(raw))
    }
}

impl std::fmt::Display for FeasibilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FeasibilityLabel {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_response(s)
    }
}
