//! Application-level configuration.
//!
//! - [`AnalysisParams`]: model, temperature and SQL dialect for every stage

pub mod analysis_params;

pub use analysis_params::AnalysisParams;
