//! Configuration file loading for askdata
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ASKDATA_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./askdata.toml` or `./.askdata.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/askdata/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileCatalogConfig, FileConfig, FileLoggingConfig,
    FileOpenAiConfig, FileOutputConfig, FileProvidersConfig,
};
pub use loader::{ConfigError, ConfigLoader};
