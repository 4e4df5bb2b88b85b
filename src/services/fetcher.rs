// src/services/fetcher.rs

//! Page fetching.
//!
//! The extraction engine only ever sees an already-fetched page. Fetching sits
//! behind [`DocumentFetcher`] so the batch runner can be driven by plain HTTP,
//! a rendering backend, or canned pages in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, Site};

/// What to fetch and how.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub proxy: Option<&'a str>,

    /// Page content is produced by JavaScript
    pub render_js: bool,
}

impl<'a> From<&'a Site> for FetchRequest<'a> {
    fn from(site: &'a Site) -> Self {
        Self {
            url: &site.url,
            proxy: site.proxy.as_deref(),
            render_js: site.use_headless_browser,
        }
    }
}

/// A fetched page, not yet parsed.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,

    /// Final URL after redirects
    pub base_url: Url,
}

/// Source of page content.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<FetchedPage>;
}

/// Fetches pages over plain HTTP.
///
/// Has no JavaScript engine; pages that need rendering are fetched as served.
pub struct HttpFetcher {
    client: Client,
    config: CrawlerConfig,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: Self::build_client(config, None)?,
            config: config.clone(),
        })
    }

    fn build_client(config: &CrawlerConfig, proxy: Option<&str>) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(proxy) = proxy {
            let proxy = Proxy::all(proxy)
                .map_err(|e| AppError::config(format!("invalid proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<FetchedPage> {
        if request.render_js {
            log::warn!(
                "{} asks for JavaScript rendering, which is unavailable; fetching static HTML",
                request.url
            );
        }

        let proxied;
        let client = match request.proxy {
            Some(proxy) => {
                proxied = Self::build_client(&self.config, Some(proxy))?;
                &proxied
            }
            None => &self.client,
        };

        log::debug!("GET {}", request.url);
        let response = client
            .get(request.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(request.url, e))?;

        let base_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| AppError::fetch(request.url, e))?;

        Ok(FetchedPage { html, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteSelectors;

    #[test]
    fn test_request_from_site() {
        let site = Site {
            name: "blog".to_string(),
            url: "https://example.com/".to_string(),
            use_headless_browser: true,
            proxy: Some("http://127.0.0.1:8080".to_string()),
            description: None,
            base_url: None,
            selectors: SiteSelectors::new("article", "h2", "a"),
        };
        let request = FetchRequest::from(&site);
        assert_eq!(request.url, "https://example.com/");
        assert_eq!(request.proxy, Some("http://127.0.0.1:8080"));
        assert!(request.render_js);
    }

    #[test]
    fn test_new_fetcher() {
        assert!(HttpFetcher::new(&CrawlerConfig::default()).is_ok());
    }
}
