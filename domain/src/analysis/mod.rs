//! Analysis domain
//!
//! Value objects produced by the three decision stages and the parsers that
//! turn untrusted backend text into them:
//!
//! | Stage | Value | Parser |
//! |-------|-------|--------|
//! | Feasibility | [`FeasibilityLabel`] | [`FeasibilityLabel::parse_response`] |
//! | Chart selection | [`ChartId`] | [`ChartId::parse_response`] |
//! | Query synthesis | [`GeneratedQuery`] | [`GeneratedQuery::from_response`] |

pub mod chart;
pub mod feasibility;
pub mod outcome;
pub mod query;

pub use chart::{ChartId, ChartKind};
pub use feasibility::FeasibilityLabel;
pub use outcome::{AnalysisOutcome, AnalysisReport};
pub use query::{GeneratedQuery, SqlDialect, strip_code_fence};

/// The three backend calls of a question/answer cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Feasibility,
    ChartSelection,
    QuerySynthesis,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Feasibility => "feasibility",
            Stage::ChartSelection => "chart_selection",
            Stage::QuerySynthesis => "query_synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
