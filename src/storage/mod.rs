//! Storage abstractions for generated feeds.
//!
//! ## Directory Structure
//!
//! ```text
//! rss/
//! ├── readme.md         # Index of generated feeds
//! ├── hacker_blog.xml   # One RSS document per site
//! └── release_notes.xml
//! ```

pub mod local;
mod readme;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use readme::render_readme;

/// Storage key of the README index.
pub const README_KEY: &str = "readme.md";

static UNSAFE_FILE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\s]+"#).expect("static pattern compiles")
});

/// A feed that was written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedIndexEntry {
    pub site_name: String,
    pub site_url: String,

    /// Storage key of the feed file
    pub key: String,
}

/// Trait for feed storage backends.
#[async_trait]
pub trait FeedStorage: Send + Sync {
    /// Write a site's RSS document, returning its storage key.
    async fn write_feed(&self, site_name: &str, xml: &str) -> Result<String>;

    /// Write the README index, returning its storage key.
    async fn write_index(&self, markdown: &str) -> Result<String>;

    /// Where a key lives, for log output.
    fn location(&self, key: &str) -> String;
}

/// Storage key for a site's feed: the site name with path-hostile
/// characters replaced.
pub fn feed_key(site_name: &str) -> String {
    let stem = UNSAFE_FILE_CHARS.replace_all(site_name.trim(), "_");
    let stem = stem.trim_matches(|c: char| c == '_' || c == '.');
    if stem.is_empty() {
        "feed.xml".to_string()
    } else {
        format!("{stem}.xml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_key_plain() {
        assert_eq!(feed_key("hacker-blog"), "hacker-blog.xml");
    }

    #[test]
    fn test_feed_key_sanitized() {
        assert_eq!(feed_key("a/b: news?"), "a_b_news.xml");
        assert_eq!(feed_key("../etc"), "etc.xml");
        assert_eq!(feed_key("技术 博客"), "技术_博客.xml");
    }

    #[test]
    fn test_feed_key_empty() {
        assert_eq!(feed_key(" / "), "feed.xml");
    }
}
