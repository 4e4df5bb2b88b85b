//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SiteEntry;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetching behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Where generated files go
    #[serde(default)]
    pub output: OutputConfig,

    /// Feed rendering settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Raw site tables, decoded one by one so a bad entry stays isolated
    #[serde(default)]
    pub sites: Vec<toml::Value>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Site entries are checked separately by [`Config::site_entries`].
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.output.dir.trim().is_empty() {
            return Err(AppError::validation("output.dir is empty"));
        }
        if let Some(base) = &self.output.feed_base_url {
            url::Url::parse(base)?;
        }
        Ok(())
    }

    /// Decode every `[[sites]]` table independently.
    pub fn site_entries(&self) -> Vec<SiteEntry> {
        self.sites
            .iter()
            .enumerate()
            .map(|(index, value)| SiteEntry::decode(index, value))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            feed: FeedConfig::default(),
            sites: Vec::new(),
        }
    }
}

/// HTTP client and fetching behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Cooldown in milliseconds each worker waits after finishing a site
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum sites processed at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Output location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving feed files and the README index
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Write a README index of generated feeds
    #[serde(default = "defaults::readme")]
    pub readme: bool,

    /// Public URL prefix the output directory is served from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_base_url: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            readme: defaults::readme(),
            feed_base_url: None,
        }
    }
}

/// Feed rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Joins the post title and its extra fields
    #[serde(default = "defaults::title_separator")]
    pub title_separator: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title_separator: defaults::title_separator(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; web2rss/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Output defaults
    pub fn output_dir() -> String {
        "rss".into()
    }
    pub fn readme() -> bool {
        true
    }

    // Feed defaults
    pub fn title_separator() -> String {
        " | ".into()
    }
}
