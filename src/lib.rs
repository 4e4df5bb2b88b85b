// src/lib.rs

//! web2rss Library
//!
//! Turns HTML pages into RSS feeds. Each site is described by CSS selectors
//! locating repeating post blocks and the fields inside them; the extraction
//! engine in [`services`] is a pure transform from a parsed page to posts.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
