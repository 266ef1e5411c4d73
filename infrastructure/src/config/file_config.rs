//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use askdata_application::AnalysisParams;
use askdata_domain::{DataCatalog, Model, OutputFormat, SqlDialect};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("backend.model cannot be empty")]
    EmptyModelName,

    #[error("backend.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("catalog.dialect: {0}")]
    UnknownDialect(String),
}

/// Raw backend configuration from TOML (`[backend]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Chat completion model name
    pub model: String,
    /// Sampling temperature; 0.0 keeps answers stable
    pub temperature: f32,
    /// Timeout in seconds for a whole question
    pub timeout_seconds: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            temperature: 0.0,
            timeout_seconds: 60,
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the API (any OpenAI-compatible server works).
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 1024,
        }
    }
}

/// Raw provider configuration from TOML (`[providers]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
}

/// Raw catalog configuration from TOML (`[catalog]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// File holding the data context text; the built-in catalog is used when unset
    pub context_file: Option<PathBuf>,
    /// SQL dialect used to validate generated queries
    pub dialect: String,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            context_file: None,
            dialect: SqlDialect::default().to_string(),
        }
    }
}

impl FileCatalogConfig {
    /// Read the data context: the configured file, or the built-in catalog
    pub fn load_context(&self) -> std::io::Result<String> {
        match &self.context_file {
            Some(path) => std::fs::read_to_string(path),
            None => Ok(DataCatalog::ecommerce().render()),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw logging configuration from TOML (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving every prompt/response exchange
    pub conversation_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend model settings
    pub backend: FileBackendConfig,
    /// Provider settings
    pub providers: FileProvidersConfig,
    /// Data context settings
    pub catalog: FileCatalogConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.backend.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        let temperature = self.backend.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }

        SqlDialect::new(&self.catalog.dialect).map_err(ConfigValidationError::UnknownDialect)?;

        Ok(())
    }

    /// Convert into the parameters the use cases run with.
    ///
    /// Validates first, so callers never see a half-built value.
    pub fn analysis_params(&self) -> Result<AnalysisParams, ConfigValidationError> {
        self.validate()?;
        let dialect =
            SqlDialect::new(&self.catalog.dialect).map_err(ConfigValidationError::UnknownDialect)?;
        let model = match self.backend.model.trim().parse::<Model>() {
            Ok(model) => model,
            Err(never) => match never {},
        };

        Ok(AnalysisParams::default()
            .with_model(model)
            .with_temperature(self.backend.temperature)
            .with_dialect(dialect))
    }
}
