//! Pipeline entry points.
//!
//! - `run_sites`: fetch every site, write its feed and the README index
//! - `check_sites`: offline validation of site entries

pub mod generate;
pub mod validate;

pub use generate::{
    RunStats, SiteOutcome, SiteReport, SkipReason, process_site, run_sites, select_site,
    summarize,
};
pub use validate::{SiteCheck, check_sites};
