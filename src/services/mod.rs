//! Service layer for web2rss.
//!
//! This module contains the business logic for:
//! - Selector compilation (`SelectorConfig`)
//! - Date normalization (`dates`)
//! - Field and post extraction (`extract_fields`, `extract`)
//! - Page fetching (`DocumentFetcher`, `HttpFetcher`)
//! - RSS rendering (`render_feed`)

pub mod dates;
mod extract;
mod feed;
mod fetcher;
mod fields;
mod selectors;

pub use extract::{extract, extract_html};
pub use feed::{build_channel, render_feed};
pub use fetcher::{DocumentFetcher, FetchRequest, FetchedPage, HttpFetcher};
pub use fields::{BlockFields, extract_fields};
pub use selectors::{ExtraSelector, SelectorConfig, parse_selector};
