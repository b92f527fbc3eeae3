//! Configuration management for Pressroom.
//!
//! Parses `pressroom.toml` with serde and auto-discovers the file in the
//! current directory or its parents. Every section is optional.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.base_url`
//! - `content.api_token`
//! - `metadata.user_agent`
//!
//! ## Example
//!
//! ```toml
//! [content]
//! base_url = "${CMS_URL:-http://localhost:1337}"
//! api_token = "${CMS_API_TOKEN}"
//!
//! [content.retry]
//! max_retries = 2
//!
//! [metadata]
//! timeout_secs = 5
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pressroom.toml";

/// Upper bound for `content.retry.max_retries`.
const MAX_RETRIES_LIMIT: u32 = 10;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content API base URL.
    pub base_url: Option<String>,
    /// Override content API token.
    pub api_token: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content API configuration.
    pub content: ContentConfig,
    /// External metadata extraction configuration.
    pub metadata: MetadataConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// CMS base URL, without the API prefix.
    pub base_url: String,
    /// Path prefix of the REST API.
    pub api_prefix: String,
    /// Bearer token sent with every request.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1337".to_owned(),
            api_prefix: "/api".to_owned(),
            api_token: None,
            timeout_secs: 30,
            retry: RetryConfig::default(),
        }
    }
}

impl ContentConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the content API section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "content.base_url")?;
        require_http_url(&self.base_url, "content.base_url")?;
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "content.api_prefix must start with /".to_owned(),
            ));
        }
        if let Some(token) = &self.api_token {
            require_non_empty(token, "content.api_token")?;
        }
        require_positive(self.timeout_secs, "content.timeout_secs")?;
        self.retry.validate()
    }
}

/// Retry policy for transient content API failures (502/503/504 and
/// network errors).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each attempt.
    pub base_delay_ms: u64,
    /// Upper bound for a single delay (before jitter).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 300,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    /// Delay before the first retry.
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Maximum delay between attempts.
    #[must_use]
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::Validation(format!(
                "content.retry.max_retries cannot exceed {MAX_RETRIES_LIMIT}"
            )));
        }
        if self.base_delay_ms > self.max_delay_ms {
            return Err(ConfigError::Validation(
                "content.retry.base_delay_ms cannot exceed content.retry.max_delay_ms".to_owned(),
            ));
        }
        Ok(())
    }
}

/// External metadata extraction configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Fetch timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent when fetching external pages.
    pub user_agent: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: concat!(
                "Mozilla/5.0 (compatible; PressroomBot/",
                env!("CARGO_PKG_VERSION"),
                ")"
            )
            .to_owned(),
        }
    }
}

impl MetadataConfig {
    /// Fetch timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.timeout_secs, "metadata.timeout_secs")?;
        require_non_empty(&self.user_agent, "metadata.user_agent")
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.api_token`").
        field: String,
        /// Error message (e.g., "${`CMS_API_TOKEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_positive(value: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `pressroom.toml` in the current directory and its parents, falling
    /// back to defaults when none exists.
    ///
    /// CLI settings are applied last and validated with the rest.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.content.base_url.clone_from(base_url);
        }
        if let Some(api_token) = &settings.api_token {
            self.content.api_token = Some(api_token.clone());
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content.validate()?;
        self.metadata.validate()
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.content.base_url = expand::expand_env(&self.content.base_url, "content.base_url")?;
        if let Some(ref token) = self.content.api_token {
            self.content.api_token = Some(expand::expand_env(token, "content.api_token")?);
        }
        self.metadata.user_agent =
            expand::expand_env(&self.metadata.user_agent, "metadata.user_agent")?;
        Ok(())
    }
}
