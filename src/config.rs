//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.termfetch.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".termfetch.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Remote API endpoints.
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// API keys.
    #[serde(default)]
    pub keys: KeysConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Width in characters of rendered ASCII images.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Number of items rendered concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_width() -> u32 {
    80
}

fn default_concurrency() -> usize {
    4
}

/// Base URLs of the remote services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// GitHub REST API root.
    #[serde(default = "default_github_url")]
    pub github_url: String,

    /// News API top-headlines endpoint.
    #[serde(default = "default_news_url")]
    pub news_url: String,

    /// Reddit root (JSON listings are served under it).
    #[serde(default = "default_reddit_url")]
    pub reddit_url: String,

    /// OpenWeatherMap current weather endpoint.
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// User-Agent sent with every request. GitHub and Reddit reject
    /// anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            github_url: default_github_url(),
            news_url: default_news_url(),
            reddit_url: default_reddit_url(),
            weather_url: default_weather_url(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

fn default_news_url() -> String {
    "https://newsapi.org/v2/top-headlines".to_string()
}

fn default_reddit_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_user_agent() -> String {
    format!("termfetch/{}", env!("CARGO_PKG_VERSION"))
}

/// API keys for services that require one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default)]
    pub news_api_key: String,

    #[serde(default)]
    pub weather_api_key: String,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(width) = args.width {
            self.general.width = width;
        }
        if let Some(concurrency) = args.concurrency {
            self.general.concurrency = concurrency;
        }
        if let Some(ref key) = args.news_api_key {
            self.keys.news_api_key = key.clone();
        }
        if let Some(ref key) = args.weather_api_key {
            self.keys.weather_api_key = key.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
