//! README index of generated feeds.

use crate::storage::FeedIndexEntry;

/// Render the markdown index listing each feed with its source page.
///
/// Feed links use `feed_base_url` as prefix when given, otherwise they stay
/// relative to the output directory.
pub fn render_readme(entries: &[FeedIndexEntry], feed_base_url: Option<&str>) -> String {
    let mut out = String::from("# RSS Feeds\n\n");
    if entries.is_empty() {
        out.push_str("No feeds generated yet.\n");
        return out;
    }

    for entry in entries {
        let feed_url = match feed_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), entry.key),
            None => entry.key.clone(),
        };
        out.push_str(&format!(
            "## {}\n- Source: {}\n- Feed: [{}]({})\n\n",
            entry.site_name, entry.site_url, feed_url, feed_url
        ));
    }
    out
}
