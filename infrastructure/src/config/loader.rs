//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_CONFIG_FILES: [&str; 2] = ["askdata.toml", ".askdata.toml"];
const ENV_PREFIX: &str = "ASKDATA_";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ASKDATA_` environment variables (`ASKDATA_BACKEND__MODEL=gpt-4.1`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./askdata.toml` or `./.askdata.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/askdata/config.toml`
    /// 5. Default values
    ///
    /// The merged result is validated before it is returned.
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/askdata/config.toml if set,
    /// otherwise falls back to ~/.config/askdata/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("askdata").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] Variables: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./askdata.toml or ./.askdata.toml");
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
