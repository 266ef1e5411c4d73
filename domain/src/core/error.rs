//! Validation errors raised while parsing backend responses.
//!
//! Every error keeps the raw backend text so callers can show exactly what
//! the model said next to the reason it was rejected.

use thiserror::Error;

/// The feasibility response was not one of the three allowed labels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("response not in allowed set (\"feasible\", \"partially feasible\", \"not feasible\"): {raw:?}")]
pub struct ClassificationError {
    raw: String,
}

impl ClassificationError {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Raw backend response
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Human-readable reason
    pub fn reason(&self) -> &'static str {
        "response not in allowed set"
    }
}

/// Why a chart selection response was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSelectionFailure {
    /// The text is not an integer at all ("one", "2.5", "")
    NotAnInteger,
    /// An integer, but not 1 or 2
    OutOfRange(i64),
}

/// The chart selection response was not the integer 1 or 2
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {raw:?}", self.reason())]
pub struct ChartSelectionError {
    raw: String,
    failure: ChartSelectionFailure,
}

impl ChartSelectionError {
    pub fn new(raw: impl Into<String>, failure: ChartSelectionFailure) -> Self {
        Self {
            raw: raw.into(),
            failure,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn failure(&self) -> ChartSelectionFailure {
        self.failure
    }

    pub fn reason(&self) -> String {
        match self.failure {
            ChartSelectionFailure::NotAnInteger => {
                "response not parseable as integer 1 or 2".to_string()
            }
            ChartSelectionFailure::OutOfRange(n) => {
                format!("response {} is not among acceptable values 1, 2", n)
            }
        }
    }
}

/// Why a generated query was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySynthesisFailure {
    /// Nothing left after removing the code fence
    Empty,
    /// The SQL parser rejected the text
    Unparseable(String),
    /// Parsing succeeded but produced no statements (e.g. a lone `;`)
    NoStatements,
}

/// The generated query is not syntactically valid SQL
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {query:?}", self.reason())]
pub struct QuerySynthesisError {
    query: String,
    failure: QuerySynthesisFailure,
}

impl QuerySynthesisError {
    pub fn new(query: impl Into<String>, failure: QuerySynthesisFailure) -> Self {
        Self {
            query: query.into(),
            failure,
        }
    }

    /// The offending query text (after fence stripping)
    pub fn raw(&self) -> &str {
        &self.query
    }

    pub fn failure(&self) -> &QuerySynthesisFailure {
        &self.failure
    }

    pub fn reason(&self) -> String {
        match &self.failure {
            QuerySynthesisFailure::Empty => "response is empty".to_string(),
            QuerySynthesisFailure::Unparseable(msg) => format!("query failed to parse ({})", msg),
            QuerySynthesisFailure::NoStatements => "query contains no statements".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_error_keeps_raw() {
        let err = ClassificationError::new("Feasible.");
        assert_eq!(err.raw(), "Feasible.");
        assert_eq!(err.reason(), "response not in allowed set");
        assert!(err.to_string().contains("\"Feasible.\""));
    }

    #[test]
    fn test_chart_selection_reasons() {
        let err = ChartSelectionError::new("one", ChartSelectionFailure::NotAnInteger);
        assert_eq!(err.reason(), "response not parseable as integer 1 or 2");

        let err = ChartSelectionError::new("3", ChartSelectionFailure::OutOfRange(3));
        assert_eq!(err.failure(), ChartSelectionFailure::OutOfRange(3));
        assert!(err.to_string().starts_with("response 3 is not among acceptable values"));
    }

    #[test]
    fn test_query_synthesis_error_display() {
        let err = QuerySynthesisError::new(
            "SELEC 1",
            QuerySynthesisFailure::Unparseable("Expected an SQL statement".to_string()),
        );
        assert_eq!(err.raw(), "SELEC 1");
        assert!(err.to_string().starts_with("query failed to parse"));
        assert!(err.to_string().contains("SELEC 1"));
    }
}
