//! Crawler module for walking the council document archive
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching of listing pages and documents
//! - HTML parsing and label/identifier pairing
//! - Per-page extraction and download
//! - The backwards traversal over listing pages

mod extractor;
mod fetcher;
mod parser;
mod traversal;

pub use extractor::{matches_filter, PageExtractor, PageOutcome, PageReport};
pub use fetcher::{
    build_http_client, fetch_document, fetch_page, FetchFailure, FetchResult,
};
pub use parser::{parse_listing, FileReference, ParsedListing};
pub use traversal::{Traversal, TraversalOptions};

use crate::config::Config;
use crate::output::TraversalSummary;
use crate::url::parse_page_url;
use crate::ScraperError;
use std::path::PathBuf;
use std::time::Duration;

/// Runs a complete traversal from a configuration
///
/// This is the main entry point for a run. It will:
/// 1. Parse the start address
/// 2. Build the HTTP client and page extractor
/// 3. Walk the listing pages backwards, downloading matching documents
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(TraversalSummary)` - Traversal completed
/// * `Err(ScraperError)` - Invalid start address or a filesystem failure
pub async fn download_documents(config: &Config) -> Result<TraversalSummary, ScraperError> {
    let start = parse_page_url(&config.scraper.start_url)?;
    let extractor = PageExtractor::from_config(config)?;

    let options = TraversalOptions {
        output_dir: PathBuf::from(&config.scraper.output),
        max_pages: config.scraper.max_pages,
        delay: Duration::from_secs(config.scraper.delay),
        filter: config.scraper.effective_filter().map(str::to_string),
    };

    Traversal::new(extractor).run(start, &options).await
}
