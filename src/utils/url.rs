// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Resolve a link found on a page against the page's base URL.
///
/// Values that already start with `http` are kept as written; everything else
/// goes through standard relative-URL resolution. Blank or unresolvable values
/// yield `None`.
///
/// # Examples
/// ```
/// use url::Url;
/// use web2rss::utils::url::resolve_link;
///
/// let base = Url::parse("https://example.com/blog/").unwrap();
/// assert_eq!(
///     resolve_link(&base, "/post/1").as_deref(),
///     Some("https://example.com/post/1")
/// );
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/").unwrap()
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(
            resolve_link(&base(), "/post/1").as_deref(),
            Some("https://example.com/post/1")
        );
    }

    #[test]
    fn test_resolve_absolute_url_unchanged() {
        assert_eq!(
            resolve_link(&base(), "https://other.com/x").as_deref(),
            Some("https://other.com/x")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_link(&base(), "page.html").as_deref(),
            Some("https://example.com/blog/page.html")
        );
    }

    #[test]
    fn test_resolve_relative_from_file() {
        let base = Url::parse("https://example.com/path/index.html").unwrap();
        assert_eq!(
            resolve_link(&base, "../other.html").as_deref(),
            Some("https://example.com/other.html")
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve_link(&base(), "//cdn.example.com/a").as_deref(),
            Some("https://cdn.example.com/a")
        );
    }

    #[test]
    fn test_resolve_blank_is_none() {
        assert_eq!(resolve_link(&base(), "   "), None);
    }
}
