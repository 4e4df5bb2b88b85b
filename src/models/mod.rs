// src/models/mod.rs

//! Domain models for web2rss.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod post;
mod selectors;
mod site;

// Re-export all public types
pub use config::{Config, CrawlerConfig, FeedConfig, OutputConfig};
pub use post::{
    EXTRA_FIELD_SENTINEL, ExtraFieldWarning, Extraction, ExtractionDiagnostic, MissingField,
    PostRecord,
};
pub use selectors::SiteSelectors;
pub use site::{Site, SiteEntry};
