//! Post extraction pipeline.
//!
//! Runs the field extractor over every block of a parsed document and
//! collects posts in document order. Pure with respect to its inputs: no
//! logging, no I/O, nothing shared between calls.

use scraper::Html;

use crate::models::{ExtraFieldWarning, Extraction, ExtractionDiagnostic};
use crate::services::SelectorConfig;
use crate::services::dates;
use crate::services::fields::extract_fields;

/// Extract posts from a parsed document.
///
/// Blocks missing a required field are skipped and recorded in
/// [`Extraction::rejected`]. An empty result is not an error.
pub fn extract(document: &Html, config: &SelectorConfig) -> Extraction {
    let mut extraction = Extraction::default();

    for (block_index, block) in document.select(&config.block).enumerate() {
        match extract_fields(block, config) {
            Ok(fields) => {
                extraction
                    .warnings
                    .extend(fields.unmatched_extras.iter().map(|selector| ExtraFieldWarning {
                        block_index,
                        selector: selector.clone(),
                    }));
                let date = dates::normalize(fields.date_element);
                extraction.posts.push(fields.into_post(date));
            }
            Err(missing) => extraction.rejected.push(ExtractionDiagnostic {
                block_index,
                missing,
            }),
        }
    }

    extraction
}

/// Parse raw HTML and extract posts from it.
pub fn extract_html(html: &str, config: &SelectorConfig) -> Extraction {
    let document = Html::parse_document(html);
    extract(&document, config)
}
