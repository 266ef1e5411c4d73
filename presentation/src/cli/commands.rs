//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable answer with the label and the chart or query
    Full,
    /// JSON report
    Json,
}

impl From<OutputFormat> for askdata_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => askdata_domain::OutputFormat::Full,
            OutputFormat::Json => askdata_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for askdata
#[derive(Parser, Debug)]
#[command(name = "askdata")]
#[command(author, version, about = "Answer business questions from a fixed data catalog")]
#[command(long_about = r#"
askdata decides how a business question can be answered from the data catalog.

The process has up to two stages:
1. Feasibility: is the question feasible, partially feasible or not feasible?
2. Feasible questions pick one of the precomputed charts;
   partially feasible questions get a newly written SQL query.

Configuration files are loaded from (in priority order):
1. ASKDATA_* environment variables
2. --config <path>     Explicit config file
3. ./askdata.toml      Project-level config
4. ~/.config/askdata/config.toml   Global config

Example:
  askdata "What is our total logistics cost?"
  askdata --dialect postgresql "What is our average monthly tax paid in 2023?"
  echo "How did revenue develop?" | askdata -o json
"#)]
pub struct Cli {
    /// The business question (read from stdin when omitted)
    pub question: Option<String>,

    /// Chat completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// File holding the data context text (default: built-in catalog)
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,

    /// SQL dialect used to validate generated queries
    #[arg(long, value_name = "DIALECT")]
    pub dialect: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Timeout in seconds for the whole question
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_only() {
        let cli = Cli::try_parse_from(["askdata", "What is our total logistics cost?"]).unwrap();
        assert_eq!(
            cli.question.as_deref(),
            Some("What is our total logistics cost?")
        );
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_all_overrides() {
        let cli = Cli::try_parse_from([
            "askdata",
            "-m",
            "gpt-4.1",
            "--temperature",
            "0.3",
            "--dialect",
            "sqlite",
            "-o",
            "json",
            "--timeout",
            "30",
            "-vv",
            "--log-dir",
            "logs",
            "Revenue?",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-4.1"));
        assert_eq!(cli.temperature, Some(0.3));
        assert_eq!(cli.dialect.as_deref(), Some("sqlite"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.timeout, Some(30));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_question_is_optional() {
        let cli = Cli::try_parse_from(["askdata", "--show-config"]).unwrap();
        assert!(cli.question.is_none());
        assert!(cli.show_config);
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        assert!(Cli::try_parse_from(["askdata", "-o", "synthesis", "q"]).is_err());
    }
}
