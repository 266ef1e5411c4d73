//! Domain layer for askdata
//!
//! This crate contains the value objects and pure logic of the assistant.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! A question goes through at most two backend stages:
//!
//! - **Feasibility**: is the question answerable from materialized results
//!   ([`FeasibilityLabel::Feasible`]), from a new query
//!   ([`FeasibilityLabel::PartiallyFeasible`]), or not at all?
//! - **Chart selection** or **query synthesis**, depending on the label.
//!
//! Backend text is untrusted. Each stage parses it into a closed type
//! ([`FeasibilityLabel`], [`ChartId`], [`GeneratedQuery`]) or fails with a
//! typed validation error that keeps the raw response.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use analysis::{
    AnalysisOutcome, AnalysisReport, ChartId, ChartKind, FeasibilityLabel, GeneratedQuery,
    SqlDialect, Stage, strip_code_fence,
};
pub use catalog::{DataCatalog, MaterializedQuery, TableDescription};
pub use config::OutputFormat;
pub use core::{
    error::{
        ChartSelectionError, ChartSelectionFailure, ClassificationError, QuerySynthesisError,
        QuerySynthesisFailure,
    },
    model::Model,
    question::Question,
    string::{preview, truncate},
};
pub use prompt::{AnalysisPromptTemplate, Message, Role};
