//! CLI configuration utilities

use anyhow::{Context, Result};
use console_core::ConsoleConfig;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("console")
        .join("console.toml")
}

/// Load the console configuration
///
/// An explicit path must exist. Without one, the default location is used
/// when present and the environment alone otherwise.
pub fn load_config(path: Option<&Path>) -> Result<ConsoleConfig> {
    if let Some(path) = path {
        info!("Loading configuration from: {}", path.display());
        return ConsoleConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        info!("Loading configuration from: {}", default_path.display());
        ConsoleConfig::from_file(&default_path).with_context(|| {
            format!("Failed to load configuration from {}", default_path.display())
        })
    } else {
        info!("Using default configuration with environment overrides");
        ConsoleConfig::from_env().context("Failed to load configuration from environment")
    }
}

/// Write a default configuration file, creating parent directories
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = ConsoleConfig::default().to_toml()?;
    std::fs::write(path, content)?;
    Ok(())
}
