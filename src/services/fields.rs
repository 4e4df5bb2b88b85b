//! Field extraction for a single post block.

use chrono::{DateTime, FixedOffset};
use scraper::ElementRef;

use crate::models::{EXTRA_FIELD_SENTINEL, MissingField, PostRecord};
use crate::services::SelectorConfig;
use crate::utils::resolve_link;

/// Fields pulled out of one block, date still unresolved.
#[derive(Debug, Clone)]
pub struct BlockFields<'a> {
    pub title: String,
    pub description: String,
    pub link: String,
    pub extra_fields: Vec<String>,

    /// Extra selectors that matched nothing, replaced by the sentinel
    pub unmatched_extras: Vec<String>,

    /// Element matched by the date selector, if any
    pub date_element: Option<ElementRef<'a>>,
}

impl BlockFields<'_> {
    /// Finish the record with its resolved date.
    pub fn into_post(self, publication_date: Option<DateTime<FixedOffset>>) -> PostRecord {
        PostRecord {
            title: self.title,
            description: self.description,
            link: self.link,
            extra_fields: self.extra_fields,
            publication_date,
        }
    }
}

/// Extract title, description, link and extra fields from a block.
///
/// Returns every missing required field when the block cannot become a post.
pub fn extract_fields<'a>(
    block: ElementRef<'a>,
    config: &SelectorConfig,
) -> Result<BlockFields<'a>, Vec<MissingField>> {
    let title = block
        .select(&config.title)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());

    let description = match &config.description {
        Some(sel) => block.select(sel).next().map(element_text),
        None => Some(element_text(block)),
    };

    let link = extract_link(block, config);

    let (title, description, link) = match (title, description, link) {
        (Some(t), Some(d), Some(l)) => (t, d, l),
        (t, d, l) => {
            let mut missing = Vec::new();
            if t.is_none() {
                missing.push(MissingField::Title);
            }
            if d.is_none() {
                missing.push(MissingField::Description);
            }
            if l.is_none() {
                missing.push(MissingField::Link);
            }
            return Err(missing);
        }
    };

    let mut extra_fields = Vec::with_capacity(config.extras.len());
    let mut unmatched_extras = Vec::new();
    for extra in &config.extras {
        match block.select(&extra.selector).next() {
            Some(el) => extra_fields.push(element_text(el)),
            None => {
                extra_fields.push(EXTRA_FIELD_SENTINEL.to_string());
                unmatched_extras.push(extra.source.clone());
            }
        }
    }

    let date_element = config
        .date
        .as_ref()
        .and_then(|sel| block.select(sel).next());

    Ok(BlockFields {
        title,
        description,
        link,
        extra_fields,
        unmatched_extras,
        date_element,
    })
}

/// First link attribute among the link selector's matches, or on the block
/// itself, resolved to an absolute URL.
fn extract_link(block: ElementRef<'_>, config: &SelectorConfig) -> Option<String> {
    let raw = match &config.link {
        Some(sel) => block
            .select(sel)
            .find_map(|el| el.value().attr(&config.link_attr)),
        None => block.value().attr(&config.link_attr),
    }?;
    resolve_link(&config.base_url, raw)
}

/// Text content with surrounding whitespace removed.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
