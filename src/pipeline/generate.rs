// src/pipeline/generate.rs

//! Feed generation pipeline.
//!
//! Each site runs in isolation: a bad config entry, a failed fetch, or a page
//! with no posts only affects that site's report.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{Config, Site, SiteEntry};
use crate::services::{
    DocumentFetcher, FetchRequest, SelectorConfig, extract_html, render_feed,
};
use crate::pipeline::validate::claim_feed_key;
use crate::storage::{FeedIndexEntry, FeedStorage, render_readme};

/// Why a site produced no feed without anything going wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No block yielded a post
    NoPosts { blocks: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPosts { blocks: 0 } => f.write_str("no blocks matched"),
            SkipReason::NoPosts { blocks } => {
                write!(f, "all {blocks} matched blocks were rejected")
            }
        }
    }
}

/// What happened to one site.
#[derive(Debug)]
pub enum SiteOutcome {
    /// Feed written under `key`
    Generated { key: String },
    Skipped(SkipReason),
    Failed(AppError),
}

/// Per-site result of a run.
#[derive(Debug)]
pub struct SiteReport {
    pub name: String,
    pub url: Option<String>,
    pub posts: usize,
    pub rejected: usize,
    pub warnings: usize,
    pub outcome: SiteOutcome,
}

impl SiteReport {
    fn failed(name: String, url: Option<String>, error: AppError) -> Self {
        Self {
            name,
            url,
            posts: 0,
            rejected: 0,
            warnings: 0,
            outcome: SiteOutcome::Failed(error),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.outcome, SiteOutcome::Generated { .. })
    }
}

/// Totals over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub posts: usize,
}

/// Count outcomes across reports.
pub fn summarize(reports: &[SiteReport]) -> RunStats {
    reports.iter().fold(RunStats::default(), |mut stats, report| {
        match report.outcome {
            SiteOutcome::Generated { .. } => {
                stats.generated += 1;
                stats.posts += report.posts;
            }
            SiteOutcome::Skipped(_) => stats.skipped += 1,
            SiteOutcome::Failed(_) => stats.failed += 1,
        }
        stats
    })
}

/// Keep only the entry with the given name.
pub fn select_site(entries: Vec<SiteEntry>, name: &str) -> Result<Vec<SiteEntry>> {
    let selected: Vec<SiteEntry> = entries
        .into_iter()
        .filter(|entry| entry.name.as_deref() == Some(name))
        .collect();
    if selected.is_empty() {
        return Err(AppError::SiteNotFound(name.to_string()));
    }
    Ok(selected)
}

/// Generate feeds for every entry, then the README index.
///
/// Sites are processed concurrently up to `crawler.max_concurrent`; reports
/// come back in entry order. An entry whose feed file an earlier entry
/// already claims fails before anything is fetched.
///
/// `crawler.request_delay_ms` is a cooldown each worker observes after
/// finishing a site, so with `max_concurrent = 1` it spaces requests evenly.
pub async fn run_sites(
    config: &Config,
    entries: Vec<SiteEntry>,
    fetcher: &dyn DocumentFetcher,
    storage: &dyn FeedStorage,
) -> Vec<SiteReport> {
    let concurrency = config.crawler.max_concurrent.max(1);
    let delay = Duration::from_millis(config.crawler.request_delay_ms);

    let reports: Vec<SiteReport> = stream::iter(reject_duplicate_keys(entries))
        .map(|entry| async move {
            let report = process_entry(entry, config, fetcher, storage).await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            report
        })
        .buffered(concurrency)
        .collect()
        .await;

    if config.output.readme {
        let index: Vec<FeedIndexEntry> = reports
            .iter()
            .filter_map(|report| match (&report.outcome, &report.url) {
                (SiteOutcome::Generated { key }, Some(url)) => Some(FeedIndexEntry {
                    site_name: report.name.clone(),
                    site_url: url.clone(),
                    key: key.clone(),
                }),
                _ => None,
            })
            .collect();
        let markdown = render_readme(&index, config.output.feed_base_url.as_deref());
        match storage.write_index(&markdown).await {
            Ok(key) => log::info!("Index written to {}", storage.location(&key)),
            Err(e) => log::error!("Failed to write feed index: {}", e),
        }
    }

    reports
}

/// Fail every entry whose feed key collides with an earlier decoded entry.
fn reject_duplicate_keys(entries: Vec<SiteEntry>) -> Vec<SiteEntry> {
    let mut seen_keys = HashSet::new();
    entries
        .into_iter()
        .map(|mut entry| {
            entry.site = entry.site.and_then(|site| {
                claim_feed_key(&mut seen_keys, &site)?;
                Ok(site)
            });
            entry
        })
        .collect()
}

async fn process_entry(
    entry: SiteEntry,
    config: &Config,
    fetcher: &dyn DocumentFetcher,
    storage: &dyn FeedStorage,
) -> SiteReport {
    let name = entry.label();
    let site = match entry.site {
        Ok(site) => site,
        Err(e) => {
            log::error!("[{}] invalid site entry: {}", name, e);
            return SiteReport::failed(name, None, e);
        }
    };

    match process_site(&site, config, fetcher, storage).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("[{}] {}", site.name, e);
            SiteReport::failed(site.name.clone(), Some(site.url.clone()), e)
        }
    }
}

/// Fetch, extract, render and store one site's feed.
pub async fn process_site(
    site: &Site,
    config: &Config,
    fetcher: &dyn DocumentFetcher,
    storage: &dyn FeedStorage,
) -> Result<SiteReport> {
    let selectors = SelectorConfig::for_site(site)?;

    log::info!("[{}] Fetching {}", site.name, site.url);
    let page = fetcher.fetch(&FetchRequest::from(site)).await?;

    let selectors = match site.base_url {
        Some(_) => selectors,
        None => selectors.with_base_url(page.base_url.clone()),
    };
    let extraction = extract_html(&page.html, &selectors);

    for diagnostic in &extraction.rejected {
        log::debug!("[{}] skipped {}", site.name, diagnostic);
    }
    for warning in &extraction.warnings {
        log::warn!("[{}] {}", site.name, warning);
    }

    let mut report = SiteReport {
        name: site.name.clone(),
        url: Some(site.url.clone()),
        posts: extraction.posts.len(),
        rejected: extraction.rejected.len(),
        warnings: extraction.warnings.len(),
        outcome: SiteOutcome::Skipped(SkipReason::NoPosts {
            blocks: extraction.block_count(),
        }),
    };

    if extraction.is_empty() {
        log::warn!("[{}] No posts found, skipping feed generation", site.name);
        return Ok(report);
    }

    let xml = render_feed(site, &extraction.posts, &config.feed.title_separator);
    let key = storage.write_feed(&site.name, &xml).await?;
    log::info!(
        "[{}] {} posts -> {}",
        site.name,
        report.posts,
        storage.location(&key)
    );

    report.outcome = SiteOutcome::Generated { key };
    Ok(report)
}
