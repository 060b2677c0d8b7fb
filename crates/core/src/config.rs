//! Console configuration

use crate::error::CoreResult;
use crate::session::ProjectId;
use crate::toast::ToastStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a read consults the local query cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Only the cache; a miss returns no data
    #[default]
    CacheOnly,
    /// The cache when it has an entry, the network otherwise
    CacheFirst,
    /// Always the network
    NetworkOnly,
}

/// Configuration API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint of the configuration API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_secret: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Policy used by the settings panel's read
    #[serde(default)]
    pub fetch_policy: FetchPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            admin_secret: None,
            timeout_secs: default_timeout_secs(),
            fetch_policy: FetchPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsoleSection {
    /// Project used when a command does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub maintenance_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub console: ConsoleSection,
    #[serde(default)]
    pub toast: ToastStyle,
}

fn default_endpoint() -> String {
    "http://localhost:1337/v1/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("CONSOLE")
        .prefix_separator("__")
        .separator("__")
}

impl ConsoleConfig {
    /// Load configuration from a file, with `CONSOLE__*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> CoreResult<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("api.endpoint", defaults.api.endpoint)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("console.maintenance_active", defaults.console.maintenance_active)?
            .add_source(environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> CoreResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::CoreError::serialization_error(e.to_string()))
    }
}
