//! Analysis parameters: backend request settings shared by all stages.
//!
//! [`AnalysisParams`] is built once at process start from configuration and
//! handed to each use case by value. Nothing mutates it afterwards.

use askdata_domain::{Model, SqlDialect};
use serde::{Deserialize, Serialize};

/// Settings applied to every backend call of a question/answer cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Chat completion model.
    pub model: Model,
    /// Sampling temperature. 0.0 asks for the most deterministic output the
    /// backend offers; it is not a guarantee.
    pub temperature: f32,
    /// Dialect used to validate synthesized queries.
    pub dialect: SqlDialect,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.0,
            dialect: SqlDialect::generic(),
        }
    }
}

impl AnalysisParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }
}
