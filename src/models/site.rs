// src/models/site.rs

//! Site entries: one page to turn into one feed.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SiteSelectors;

/// A page to scrape, with the selectors that locate its posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Unique site name, also used for the feed file name
    pub name: String,

    /// Page URL
    pub url: String,

    /// Whether the page needs JavaScript rendering
    #[serde(default)]
    pub use_headless_browser: bool,

    /// Proxy URL used when fetching this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Channel description for the generated feed
    #[serde(default, alias = "follow_desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Base URL for relative links, when it differs from the page URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(flatten)]
    pub selectors: SiteSelectors,
}

impl Site {
    /// Check the fields that do not depend on selector syntax.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("site name is empty"));
        }
        let url = Url::parse(&self.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "site '{}' has unsupported URL scheme '{}'",
                self.name,
                url.scheme()
            )));
        }
        if let Some(base) = &self.base_url {
            Url::parse(base)?;
        }
        if let Some(proxy) = &self.proxy {
            Url::parse(proxy)?;
        }
        Ok(())
    }

    /// URL relative links on this page resolve against.
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(self.base_url.as_deref().unwrap_or(&self.url))?)
    }

    /// Channel description, defaulting to a line naming the page.
    pub fn feed_description(&self) -> String {
        match &self.description {
            Some(desc) if !desc.trim().is_empty() => desc.clone(),
            _ => format!("Latest posts from {}", self.url),
        }
    }
}

/// One `[[sites]]` table from the config file, decoded on its own.
#[derive(Debug)]
pub struct SiteEntry {
    /// Position in the config file
    pub index: usize,

    /// Name as written, even when the rest of the entry is malformed
    pub name: Option<String>,

    pub site: Result<Site>,
}

impl SiteEntry {
    /// Decode a raw table. Never fails; a malformed entry carries its error.
    pub fn decode(index: usize, value: &toml::Value) -> Self {
        let name = value
            .get("name")
            .and_then(toml::Value::as_str)
            .map(str::to_string);

        let site = value
            .clone()
            .try_into::<Site>()
            .map_err(AppError::from)
            .and_then(|site| site.validate().map(|()| site));

        Self { index, name, site }
    }

    /// Name for display, falling back to the entry position.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("sites[{}]", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_value(src: &str) -> toml::Value {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_decode_valid_entry() {
        let value = parse_value(
            r#"
            name = "blog"
            url = "https://example.com/blog/"
            block_selector = "article"
            title_selector = "h2"
            link_selector = "a"
            "#,
        );
        let entry = SiteEntry::decode(0, &value);
        let site = entry.site.unwrap();
        assert_eq!(site.name, "blog");
        assert!(!site.use_headless_browser);
        assert_eq!(site.selectors.block_selector, "article");
        assert_eq!(site.feed_description(), "Latest posts from https://example.com/blog/");
    }

    #[test]
    fn test_decode_missing_selector_keeps_name() {
        let value = parse_value(
            r#"
            name = "broken"
            url = "https://example.com/"
            title_selector = "h2"
            "#,
        );
        let entry = SiteEntry::decode(2, &value);
        assert_eq!(entry.label(), "broken");
        assert!(entry.site.is_err());
    }

    #[test]
    fn test_decode_unnamed_entry_label() {
        let entry = SiteEntry::decode(4, &parse_value("url = 'https://example.com'"));
        assert_eq!(entry.label(), "sites[4]");
        assert!(entry.site.is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let value = parse_value(
            r#"
            name = "ftp"
            url = "ftp://example.com/"
            block_selector = "li"
            title_selector = "a"
            "#,
        );
        let err = SiteEntry::decode(0, &value).site.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_base_url_override() {
        let value = parse_value(
            r#"
            name = "blog"
            url = "https://example.com/blog/index.html"
            base_url = "https://cdn.example.com/"
            block_selector = "li"
            title_selector = "a"
            "#,
        );
        let site = SiteEntry::decode(0, &value).site.unwrap();
        assert_eq!(site.base_url().unwrap().as_str(), "https://cdn.example.com/");
    }
}
