// src/pipeline/validate.rs

//! Configuration checks that need no network access.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::{Site, SiteEntry};
use crate::services::SelectorConfig;
use crate::storage::feed_key;

/// Result of checking one site entry.
#[derive(Debug)]
pub struct SiteCheck {
    pub name: String,
    pub result: Result<()>,
}

/// Decode each entry, compile its selectors, and flag sites whose feed
/// file would collide with an earlier one.
pub fn check_sites(entries: Vec<SiteEntry>) -> Vec<SiteCheck> {
    let mut seen_keys = HashSet::new();

    entries
        .into_iter()
        .map(|entry| {
            let name = entry.label();
            let result = entry.site.and_then(|site| {
                SelectorConfig::for_site(&site)?;
                claim_feed_key(&mut seen_keys, &site)
            });
            SiteCheck { name, result }
        })
        .collect()
}

/// Record the site's feed key, failing if an earlier site already holds it.
pub(crate) fn claim_feed_key(seen_keys: &mut HashSet<String>, site: &Site) -> Result<()> {
    let key = feed_key(&site.name);
    if !seen_keys.insert(key.clone()) {
        return Err(AppError::config(format!(
            "site '{}' writes to {} which an earlier site already uses",
            site.name, key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;

    #[test]
    fn test_check_sites() {
        let config = Config::from_toml(
            r#"
            [[sites]]
            name = "blog"
            url = "https://example.com/"
            block_selector = "article"
            title_selector = "h2"

            [[sites]]
            name = "blog"
            url = "https://example.org/"
            block_selector = "article"
            title_selector = "h2"

            [[sites]]
            name = "broken"
            url = "https://example.net/"
            block_selector = "article"
            title_selector = ""
            "#,
        )
        .unwrap();

        let checks = check_sites(config.site_entries());
        assert_eq!(checks.len(), 3);
        assert!(checks[0].result.is_ok());
        assert!(matches!(checks[1].result, Err(AppError::Config(ref m)) if m.contains("blog.xml")));
        assert!(matches!(checks[2].result, Err(AppError::Config(ref m)) if m.contains("title_selector")));
    }
}
