//! Console output formatter for analysis results

use crate::output::formatter::OutputFormatter;
use askdata_application::AnalysisError;
use askdata_domain::{AnalysisOutcome, AnalysisReport, ChartId, DataCatalog, FeasibilityLabel};
use colored::Colorize;

/// Formats analysis reports for console display
///
/// When a catalog is attached, chart answers also show the materialized
/// query that backs the chart.
#[derive(Debug, Clone, Default)]
pub struct ConsoleFormatter {
    catalog: Option<DataCatalog>,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: DataCatalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    fn label(label: FeasibilityLabel) -> String {
        let text = format!("This question is {}.", label);
        match label {
            FeasibilityLabel::Feasible => text.green().bold().to_string(),
            FeasibilityLabel::PartiallyFeasible => text.yellow().bold().to_string(),
            FeasibilityLabel::NotFeasible => text.red().bold().to_string(),
        }
    }

    fn chart(&self, chart: ChartId) -> String {
        let mut output = format!(
            "{} {} ({})\n",
            "Chart:".cyan().bold(),
            chart.title(),
            chart.kind()
        );
        if let Some(query) = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.materialized_query(chart))
        {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("Built from sql query {}:", chart.number()).dimmed(),
                Self::sql_block(&query.sql)
            ));
        }
        output
    }

    fn sql_block(sql: &str) -> String {
        format!("```sql\n{}\n```", sql.trim())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Turn off ANSI colors for everything formatted afterwards
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("askdata"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            report.question
        ));
        output.push_str(&Self::label(report.feasibility));
        output.push_str("\n\n");

        match &report.outcome {
            AnalysisOutcome::ChartReady { chart } => output.push_str(&self.chart(*chart)),
            AnalysisOutcome::QueryReady { query } => {
                output.push_str(&format!(
                    "{}\n{}\n",
                    "Generated query (not executed):".cyan().bold(),
                    Self::sql_block(query.sql())
                ));
                if !query.is_read_only() {
                    output.push_str(&format!(
                        "{}\n",
                        "Note: the query modifies data.".yellow()
                    ));
                }
            }
            AnalysisOutcome::NotAnswerable => {
                output.push_str("The available data cannot answer this question.\n");
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_json(&self, report: &AnalysisReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_error(&self, error: &AnalysisError) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), error);
        if let Some(raw) = error.raw_response() {
            output.push_str(&format!(
                "{}\n{}\n",
                "Backend response:".dimmed(),
                Self::indent(raw, "  ")
            ));
        }
        if error.is_retryable() {
            output.push_str(&format!("{}\n", "The backend may succeed on retry.".dimmed()));
        }
        output
    }

    fn format_error_json(&self, error: &AnalysisError) -> String {
        let value = serde_json::json!({
            "error": error.to_string(),
            "reason": error.reason(),
            "raw_response": error.raw_response(),
            "retryable": error.is_retryable(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
