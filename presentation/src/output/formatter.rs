//! Output formatter trait

use askdata_application::AnalysisError;
use askdata_domain::AnalysisReport;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Format a finished report for reading
    fn format(&self, report: &AnalysisReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &AnalysisReport) -> String;

    /// Format a failed cycle
    fn format_error(&self, error: &AnalysisError) -> String;

    /// Format a failed cycle as JSON
    fn format_error_json(&self, error: &AnalysisError) -> String;
}
