//! Selector compilation.
//!
//! Turns a site's [`SiteSelectors`] into parsed CSS selectors once, before any
//! extraction, so syntax errors surface as configuration errors instead of
//! silent empty matches.

use scraper::Selector;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Site, SiteSelectors};

/// An extra-field selector along with the text it was parsed from.
#[derive(Debug, Clone)]
pub struct ExtraSelector {
    pub source: String,
    pub selector: Selector,
}

/// Validated, compiled selectors for one site.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub(crate) block: Selector,
    pub(crate) title: Selector,
    pub(crate) description: Option<Selector>,
    pub(crate) link: Option<Selector>,
    pub(crate) date: Option<Selector>,
    pub(crate) extras: Vec<ExtraSelector>,
    pub(crate) link_attr: String,
    pub(crate) base_url: Url,
}

impl SelectorConfig {
    /// Compile and validate selectors against a base URL.
    pub fn compile(selectors: &SiteSelectors, base_url: Url) -> Result<Self> {
        let block = parse_required("block_selector", &selectors.block_selector)?;
        let title = parse_required("title_selector", &selectors.title_selector)?;
        let link = selectors
            .link_selector
            .as_deref()
            .map(|s| parse_required("link_selector", s))
            .transpose()?;
        let description = parse_optional(selectors.description_selector.as_deref())?;
        let date = parse_optional(selectors.date_selector.as_deref())?;

        let extras = selectors
            .extra_selectors
            .iter()
            .map(|s| {
                Ok(ExtraSelector {
                    source: s.clone(),
                    selector: parse_required("extra_selectors", s)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let link_attr = selectors.attr_name.trim();
        if link_attr.is_empty() {
            return Err(AppError::config("attr_name is empty"));
        }

        Ok(Self {
            block,
            title,
            description,
            link,
            date,
            extras,
            link_attr: link_attr.to_string(),
            base_url,
        })
    }

    /// Compile the selectors of a site entry.
    pub fn for_site(site: &Site) -> Result<Self> {
        Self::compile(&site.selectors, site.base_url()?).map_err(|e| match e {
            AppError::Config(message) => {
                AppError::config(format!("site '{}': {}", site.name, message))
            }
            other => other,
        })
    }

    /// Same selectors, resolving links against another URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn link_attr(&self) -> &str {
        &self.link_attr
    }

    pub fn extra_count(&self) -> usize {
        self.extras.len()
    }

    pub fn has_date_selector(&self) -> bool {
        self.date.is_some()
    }
}

/// Parse a CSS selector, mapping syntax errors to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn parse_required(field: &str, s: &str) -> Result<Selector> {
    if s.trim().is_empty() {
        return Err(AppError::config(format!("{field} is empty")));
    }
    parse_selector(s.trim())
}

fn parse_optional(s: Option<&str>) -> Result<Option<Selector>> {
    match s.map(str::trim) {
        Some(s) if !s.is_empty() => parse_selector(s).map(Some),
        _ => Ok(None),
    }
}
