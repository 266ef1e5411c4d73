//! Precomputed chart identifiers

use crate::core::error::{ChartSelectionError, ChartSelectionFailure};
use serde::{Deserialize, Serialize};

/// How a chart is drawn by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Pie,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line chart"),
            ChartKind::Pie => write!(f, "pie chart"),
        }
    }
}

/// One of the two precomputed charts, numbered like the materialized
/// queries that back them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ChartId {
    /// Chart 1: monthly revenue over time
    RevenueOverTime,
    /// Chart 2: cost share by category
    CostBreakdown,
}

impl ChartId {
    pub fn number(&self) -> u8 {
        match self {
            ChartId::RevenueOverTime => 1,
            ChartId::CostBreakdown => 2,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(ChartId::RevenueOverTime),
            2 => Some(ChartId::CostBreakdown),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartId::RevenueOverTime => "Revenue over time",
            ChartId::CostBreakdown => "Cost share by category",
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartId::RevenueOverTime => ChartKind::Line,
            ChartId::CostBreakdown => ChartKind::Pie,
        }
    }

    /// Parse a raw backend response into a chart id.
    ///
    /// The trimmed text must be an integer and that integer must be 1 or 2.
    pub fn parse_response(raw: &str) -> Result<Self, ChartSelectionError> {
        let n: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ChartSelectionError::new(raw, ChartSelectionFailure::NotAnInteger))?;
        Self::from_number(n)
            .ok_or_else(|| ChartSelectionError::new(raw, ChartSelectionFailure::OutOfRange(n)))
    }
}

impl From<ChartId> for u8 {
    fn from(id: ChartId) -> Self {
        id.number()
    }
}

impl TryFrom<u8> for ChartId {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        ChartId::from_number(n as i64).ok_or_else(|| format!("unknown chart id {}", n))
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
