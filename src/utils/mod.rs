//! Utility functions and helpers.

pub mod url;

pub use self::url::resolve_link;
