//! Configuration management for the BizFlow admin client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size requested for the product list
    #[serde(default = "default_products_page_size")]
    pub products_page_size: u32,

    /// Page size requested for the order list
    #[serde(default = "default_orders_page_size")]
    pub orders_page_size: u32,

    /// Ordered path rewrite table, first match wins
    #[serde(default = "default_rewrites")]
    pub rewrites: Vec<RewriteRule>,
}

/// A single path prefix rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Prefix matched against the request path
    pub source: String,
    /// Replacement for the matched prefix
    pub destination: String,
}

impl RewriteRule {
    /// Create a new rewrite rule
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Apply the rule, returning `None` when the path does not match
    #[must_use]
    pub fn apply(&self, path: &str) -> Option<String> {
        path.strip_prefix(&self.source)
            .map(|rest| format!("{}{rest}", self.destination))
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted `accessToken`/`refreshToken` pair
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_products_page_size() -> u32 {
    100
}

const fn default_orders_page_size() -> u32 {
    50
}

fn default_rewrites() -> Vec<RewriteRule> {
    vec![
        RewriteRule::new("/api/v1/", "/v1/"),
        RewriteRule::new("/api/api/v1/", "/api/v1/"),
        RewriteRule::new("/api/", "/"),
    ]
}

fn default_token_file() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".bizflow").join("session.json"),
        |dirs| dirs.home_dir().join(".bizflow").join("session.json"),
    )
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_page_size: default_products_page_size(),
            orders_page_size: default_orders_page_size(),
            rewrites: default_rewrites(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `bizflow.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, optionally from an explicit file
    ///
    /// Environment variables use the `BIZFLOW` prefix and `__` as the section
    /// separator, e.g. `BIZFLOW_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or a value has the wrong type.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = path.map_or_else(
            || config::File::with_name("bizflow").required(false),
            |p| config::File::from(p).required(true),
        );

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("BIZFLOW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut loaded: Self = config.try_deserialize()?;
        loaded.api.base_url = normalize_base_url(&loaded.api.base_url);

        if loaded.api.base_url.is_empty() {
            return Err(crate::Error::configuration("api.base_url must not be empty"));
        }

        Ok(loaded)
    }
}

/// Trim whitespace and trailing slashes from a base URL
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
