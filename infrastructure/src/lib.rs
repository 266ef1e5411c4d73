//! Infrastructure layer for askdata
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileBackendConfig, FileCatalogConfig,
    FileConfig, FileLoggingConfig, FileOpenAiConfig, FileOutputConfig,
};
pub use logging::JsonlConversationLogger;
pub use openai::OpenAiGateway;
