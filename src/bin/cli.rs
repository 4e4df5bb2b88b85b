//! web2rss CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use web2rss::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, SiteOutcome},
    services::HttpFetcher,
    storage::LocalStorage,
};

/// web2rss - RSS feeds for sites that have none
#[derive(Parser, Debug)]
#[command(name = "web2rss", version, about = "Generate RSS feeds from HTML pages")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate feeds for all sites, or a single one
    Run {
        /// Only process the site with this name
        #[arg(long)]
        site: Option<String>,

        /// Override the output directory
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List configured site names
    List,

    /// Validate the configuration without fetching anything
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(&cli.config)?;
    config.validate()?;
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Run { site, output } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }

            let entries = match &site {
                Some(name) => pipeline::select_site(config.site_entries(), name)?,
                None => config.site_entries(),
            };
            log::info!("Processing {} site(s)", entries.len());

            let fetcher = HttpFetcher::new(&config.crawler)?;
            let storage = LocalStorage::new(&config.output.dir);
            let reports = pipeline::run_sites(&config, entries, &fetcher, &storage).await;

            for report in &reports {
                match &report.outcome {
                    SiteOutcome::Generated { key } => {
                        log::info!("✓ {}: {} posts ({})", report.name, report.posts, key)
                    }
                    SiteOutcome::Skipped(reason) => {
                        log::warn!("- {}: skipped, {}", report.name, reason)
                    }
                    SiteOutcome::Failed(e) => log::error!("✗ {}: {}", report.name, e),
                }
            }

            let stats = pipeline::summarize(&reports);
            log::info!(
                "Done: {} generated, {} skipped, {} failed, {} posts",
                stats.generated,
                stats.skipped,
                stats.failed,
                stats.posts
            );

            // A single named site that failed is an error for the caller.
            if site.is_some() && stats.failed > 0 {
                return Err(AppError::validation("site failed, see log for details"));
            }
        }

        Command::List => {
            for entry in config.site_entries() {
                println!("{}", entry.label());
            }
        }

        Command::Validate => {
            let checks = pipeline::check_sites(config.site_entries());
            let mut failures = 0;
            for check in &checks {
                match &check.result {
                    Ok(()) => log::info!("✓ {}", check.name),
                    Err(e) => {
                        failures += 1;
                        log::error!("✗ {}: {}", check.name, e);
                    }
                }
            }

            if failures > 0 {
                return Err(AppError::validation(format!(
                    "{failures} of {} site(s) are invalid",
                    checks.len()
                )));
            }
            log::info!("All {} site(s) valid", checks.len());
        }
    }

    Ok(())
}
