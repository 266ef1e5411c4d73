//! CLI entrypoint for askdata
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use askdata_application::{
    AnalysisError, AnalyzeQuestionInput, AnalyzeQuestionUseCase, GatewayError,
};
use askdata_domain::{DataCatalog, OutputFormat, SqlDialect};
use askdata_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiGateway};
use askdata_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use clap::Parser;
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;
    info!("Starting askdata");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_cli_overrides(&cli, &mut config)?;
    let params = config.analysis_params()?;

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color || format == OutputFormat::Json {
        ConsoleFormatter::disable_color();
    }

    let question = match cli.question.clone() {
        Some(q) => q,
        None => read_question(std::io::stdin().lock())?,
    };
    let context = config.catalog.load_context().with_context(|| {
        format!(
            "failed to read context file {}",
            config
                .catalog
                .context_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    // === Dependency Injection ===
    let timeout = Duration::from_secs(config.backend.timeout_seconds);
    let gateway = Arc::new(OpenAiGateway::from_config(&config.providers.openai, timeout)?);
    let mut use_case = AnalyzeQuestionUseCase::new(gateway, params);
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::open(path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                use_case = use_case.with_logger(Arc::new(logger));
            }
            None => warn!("Continuing without conversation log"),
        }
    }

    let cancellation = CancellationToken::new();
    spawn_ctrl_c_handler(cancellation.clone());
    let input = AnalyzeQuestionInput::new(question, context).with_cancellation(cancellation.clone());

    let run = async {
        if cli.quiet {
            use_case.execute(input).await
        } else if std::io::stderr().is_terminal() {
            let progress = ProgressReporter::new();
            use_case.execute_with_progress(input, &progress).await
        } else {
            // stderr is not a terminal
            use_case.execute_with_progress(input, &SimpleProgress).await
        }
    };
    let result = match tokio::time::timeout(timeout, run).await {
        Ok(result) => result,
        Err(_) => {
            cancellation.cancel();
            Err(AnalysisError::BackendUnavailable(GatewayError::Timeout))
        }
    };

    // Chart answers can cite their backing query only for the built-in catalog
    let formatter = if config.catalog.context_file.is_none() {
        ConsoleFormatter::with_catalog(DataCatalog::ecommerce())
    } else {
        ConsoleFormatter::new()
    };

    match result {
        Ok(report) => {
            let output = match format {
                OutputFormat::Full => formatter.format(&report),
                OutputFormat::Json => formatter.format_json(&report),
            };
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            match format {
                OutputFormat::Full => eprint!("{}", formatter.format_error(&error)),
                OutputFormat::Json => println!("{}", formatter.format_error_json(&error)),
            }
            Ok(exit_code_for(&error))
        }
    }
}

/// Initialize logging based on verbosity level, optionally mirrored to
/// daily-rotated files.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter).with(console);

    let Some(dir) = log_dir else {
        registry.init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "askdata.log"));
    registry
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Ok(Some(guard))
}

/// Command-line flags take precedence over every configuration source.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) -> Result<()> {
    if let Some(model) = &cli.model {
        config.backend.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.backend.temperature = temperature;
    }
    if let Some(timeout) = cli.timeout {
        config.backend.timeout_seconds = timeout;
    }
    if let Some(path) = &cli.context_file {
        config.catalog.context_file = Some(path.clone());
    }
    if let Some(dialect) = &cli.dialect {
        let dialect = SqlDialect::new(dialect.as_str()).map_err(anyhow::Error::msg)?;
        config.catalog.dialect = dialect.to_string();
    }
    config.validate()?;
    Ok(())
}

/// Read the question from `reader`, dropping only the trailing line break.
///
/// Blank input is passed on like a blank argument would be.
fn read_question(mut reader: impl Read) -> Result<String> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .context("failed to read question from stdin")?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            token.cancel();
        }
    });
}

fn exit_code_for(error: &AnalysisError) -> ExitCode {
    match error {
        AnalysisError::Cancelled => ExitCode::from(130),
        AnalysisError::BackendUnavailable(_) => ExitCode::from(3),
        _ => ExitCode::from(2),
    }
}
