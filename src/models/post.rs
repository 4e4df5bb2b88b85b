//! Post records and extraction diagnostics.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Placeholder stored for an extra field whose selector matched nothing.
pub const EXTRA_FIELD_SENTINEL: &str = "N/A";

/// A post extracted from one block of a page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostRecord {
    /// Post title, surrounding whitespace stripped
    pub title: String,

    /// Text of the description source
    pub description: String,

    /// Absolute URL of the post
    pub link: String,

    /// One entry per configured extra selector
    pub extra_fields: Vec<String>,

    /// Publication date, if one could be parsed
    pub publication_date: Option<DateTime<FixedOffset>>,
}

impl PostRecord {
    /// Title with the extra fields appended, as shown in a feed reader.
    pub fn display_title(&self, separator: &str) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.extra_fields.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// A required field a block failed to provide.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MissingField {
    Title,
    Description,
    Link,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingField::Title => "title",
            MissingField::Description => "description",
            MissingField::Link => "link",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a block was left out of the output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractionDiagnostic {
    /// Position of the block among all matched blocks
    pub block_index: usize,

    /// Required fields that were not found, in rule order
    pub missing: Vec<MissingField>,
}

impl ExtractionDiagnostic {
    pub fn is_missing(&self, field: MissingField) -> bool {
        self.missing.contains(&field)
    }
}

impl fmt::Display for ExtractionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.missing.iter().map(MissingField::as_str).collect();
        write!(f, "block {}: missing:{}", self.block_index, fields.join(","))
    }
}

/// An extra selector that matched nothing in a block that was otherwise kept.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtraFieldWarning {
    pub block_index: usize,
    pub selector: String,
}

impl fmt::Display for ExtraFieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {}: no element found for selector '{}'",
            self.block_index, self.selector
        )
    }
}

/// Result of one extraction pass over a document.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Extraction {
    /// Posts in block order
    pub posts: Vec<PostRecord>,

    /// One entry per rejected block
    pub rejected: Vec<ExtractionDiagnostic>,

    /// Non-fatal extra-field misses
    pub warnings: Vec<ExtraFieldWarning>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Number of blocks the pass looked at.
    pub fn block_count(&self) -> usize {
        self.posts.len() + self.rejected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> PostRecord {
        PostRecord {
            title: "Release notes".to_string(),
            description: "What changed".to_string(),
            link: "https://example.com/post/1".to_string(),
            extra_fields: vec!["News".to_string(), EXTRA_FIELD_SENTINEL.to_string()],
            publication_date: None,
        }
    }

    #[test]
    fn test_display_title() {
        assert_eq!(sample_post().display_title(" | "), "Release notes | News | N/A");
    }

    #[test]
    fn test_display_title_without_extras() {
        let post = PostRecord {
            extra_fields: Vec::new(),
            ..sample_post()
        };
        assert_eq!(post.display_title(" | "), "Release notes");
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = ExtractionDiagnostic {
            block_index: 3,
            missing: vec![MissingField::Title, MissingField::Link],
        };
        assert_eq!(diagnostic.to_string(), "block 3: missing:title,link");
        assert!(diagnostic.is_missing(MissingField::Link));
        assert!(!diagnostic.is_missing(MissingField::Description));
    }
}
