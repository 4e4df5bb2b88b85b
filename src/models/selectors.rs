// src/models/selectors.rs

//! CSS selectors for scraping posts off a page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping posts off a page, as written in the config file.
///
/// This is the unvalidated form. It is compiled into a
/// [`crate::services::SelectorConfig`] once per site before any extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSelectors {
    /// Selector for each repeating post container
    #[serde(alias = "block_css")]
    pub block_selector: String,

    /// Selector for the title element within a block
    #[serde(alias = "title_css")]
    pub title_selector: String,

    /// Selector for the description element within a block.
    /// When absent the whole block is the description.
    #[serde(default, alias = "description_css", skip_serializing_if = "Option::is_none")]
    pub description_selector: Option<String>,

    /// Selector for the link element within a block.
    /// When absent the block itself must carry the link attribute.
    #[serde(default, alias = "link_css", skip_serializing_if = "Option::is_none")]
    pub link_selector: Option<String>,

    /// Selector for the publication date element within a block
    #[serde(default, alias = "date_css", skip_serializing_if = "Option::is_none")]
    pub date_selector: Option<String>,

    /// Supplementary fields appended to the title, in order
    #[serde(default, alias = "extra_css", skip_serializing_if = "Vec::is_empty")]
    pub extra_selectors: Vec<String>,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "default_attr_name")]
    pub attr_name: String,
}

fn default_attr_name() -> String {
    "href".to_string()
}

impl SiteSelectors {
    /// Create selectors from the three required parts.
    pub fn new(
        block: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            block_selector: block.into(),
            title_selector: title.into(),
            description_selector: None,
            link_selector: Some(link.into()),
            date_selector: None,
            extra_selectors: Vec::new(),
            attr_name: default_attr_name(),
        }
    }

    pub fn with_description(mut self, selector: impl Into<String>) -> Self {
        self.description_selector = Some(selector.into());
        self
    }

    pub fn with_date(mut self, selector: impl Into<String>) -> Self {
        self.date_selector = Some(selector.into());
        self
    }

    pub fn with_extras<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Use the block element itself as the link source.
    pub fn without_link_selector(mut self) -> Self {
        self.link_selector = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_legacy_keys() {
        let selectors: SiteSelectors = toml::from_str(
            r#"
            block_css = "article"
            title_css = "h2"
            link_css = "a"
            extra_css = [".tag", ".author"]
            "#,
        )
        .unwrap();

        assert_eq!(selectors.block_selector, "article");
        assert_eq!(selectors.link_selector.as_deref(), Some("a"));
        assert_eq!(selectors.extra_selectors, vec![".tag", ".author"]);
        assert_eq!(selectors.description_selector, None);
        assert_eq!(selectors.attr_name, "href");
    }

    #[test]
    fn test_builder() {
        let selectors = SiteSelectors::new("li", ".t", "a")
            .with_description(".d")
            .with_extras([".tag"]);
        assert_eq!(selectors.description_selector.as_deref(), Some(".d"));
        assert_eq!(selectors.extra_selectors, vec![".tag"]);
        assert!(selectors.without_link_selector().link_selector.is_none());
    }
}
