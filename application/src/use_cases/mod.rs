//! Use cases for the application layer
//!
//! One use case per decision stage, plus [`analyze_question`] which chains
//! them into a full question/answer cycle.

pub mod analyze_question;
pub mod classify_feasibility;
pub mod error;
pub mod select_chart;
pub mod synthesize_query;

pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod mock;
