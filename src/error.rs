// src/error.rs

//! Unified error handling for web2rss.

use std::fmt;

use thiserror::Error;

/// Result type alias for web2rss operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Block rejections and unparseable dates are not errors; they travel back
/// to the caller as diagnostics on [`crate::models::Extraction`].
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Page could not be obtained
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// No site with the requested name
    #[error("Site not found: {0}")]
    SiteNotFound(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error for a URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error stems from the site's configuration rather than
    /// from obtaining the page.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Selector { .. } | Self::Config(_) | Self::Validation(_) | Self::Toml(_) | Self::Url(_)
        )
    }
}
