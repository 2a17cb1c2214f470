//! Page extractor - downloads the files listed on one listing page
//!
//! For a single listing address this module:
//! - Makes sure the output directory exists
//! - Fetches and parses the page
//! - Pairs each file label with its document identifier
//! - Applies the filename filter
//! - Downloads and saves every matching document
//!
//! Fetch failures are local: a page that cannot be fetched yields zero
//! downloads, and a document that cannot be fetched is skipped. Only
//! filesystem errors are returned to the caller.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_document, fetch_page};
use crate::crawler::parser::{parse_listing, FileReference};
use crate::output::{ensure_output_dir, is_usable_filename, sanitize_filename, write_document};
use crate::url::document_url;
use crate::ScraperError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// What happened to a listing page as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page could not be fetched
    FetchFailed {
        /// Status code or network error description
        reason: String,
    },

    /// The page had no file labels
    Empty,

    /// The page was parsed and its files processed
    Scanned,
}

/// Per-page counters returned by [`PageExtractor::extract`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// What happened to the page
    pub outcome: PageOutcome,

    /// File labels found on the page
    pub found: usize,

    /// Labels that passed the filter
    pub matched: usize,

    /// Documents written to disk
    pub downloaded: usize,

    /// Labels rejected by the filter
    pub filtered_out: usize,

    /// Matching labels with no identifier after them
    pub unpaired: usize,

    /// Matching documents that could not be retrieved
    pub failed: usize,
}

impl PageReport {
    fn with_outcome(outcome: PageOutcome) -> Self {
        Self {
            outcome,
            found: 0,
            matched: 0,
            downloaded: 0,
            filtered_out: 0,
            unpaired: 0,
            failed: 0,
        }
    }

    /// Report for a page that could not be fetched
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        Self::with_outcome(PageOutcome::FetchFailed {
            reason: reason.into(),
        })
    }

    /// Report for a page without file labels
    pub fn empty() -> Self {
        Self::with_outcome(PageOutcome::Empty)
    }
}

/// Returns true if `label` should be downloaded under `filter`
///
/// Matching is a case-insensitive substring test. No filter, or a blank
/// one, matches everything.
pub fn matches_filter(label: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(word) if !word.is_empty() => label.to_lowercase().contains(&word.to_lowercase()),
        _ => true,
    }
}

/// Downloads the documents listed on council listing pages
pub struct PageExtractor {
    client: Client,
    document_url_template: String,
}

impl PageExtractor {
    /// Creates an extractor from an HTTP client and a retrieval address template
    pub fn new(client: Client, document_url_template: impl Into<String>) -> Self {
        Self {
            client,
            document_url_template: document_url_template.into(),
        }
    }

    /// Creates an extractor with a client built from the configuration
    pub fn from_config(config: &Config) -> Result<Self, ScraperError> {
        let timeout = config.scraper.request_timeout_secs.map(Duration::from_secs);
        let client = build_http_client(&config.user_agent, timeout)?;
        Ok(Self::new(
            client,
            config.scraper.document_url_template.clone(),
        ))
    }

    /// Extracts and downloads the matching documents of one listing page
    ///
    /// # Arguments
    ///
    /// * `address` - The listing page to scan
    /// * `output_dir` - Directory the documents are written into
    /// * `filter` - Optional case-insensitive word the label must contain
    ///
    /// # Returns
    ///
    /// * `Ok(PageReport)` - Counters for the page, including fetch failures
    /// * `Err(ScraperError)` - The output directory or a file could not be written
    pub async fn extract(
        &self,
        address: &Url,
        output_dir: &Path,
        filter: Option<&str>,
    ) -> Result<PageReport, ScraperError> {
        ensure_output_dir(output_dir).await?;

        tracing::info!("Accessing URL: {}", address);
        let body = match fetch_page(&self.client, address.as_str()).await.into_body() {
            Ok(body) => body,
            Err(failure) => {
                tracing::error!("Error accessing URL {}: {}", address, failure);
                return Ok(PageReport::fetch_failed(failure.to_string()));
            }
        };

        let listing = parse_listing(&body);
        if listing.is_empty() {
            tracing::info!("No files found on page: {}", address);
            return Ok(PageReport::empty());
        }

        let mut report = PageReport::with_outcome(PageOutcome::Scanned);
        report.found = listing.label_count();

        for file in &listing.files {
            if !matches_filter(&file.label, filter) {
                tracing::debug!(
                    "Skipping file (doesn't contain '{}'): {}",
                    filter.unwrap_or_default(),
                    file.label
                );
                report.filtered_out += 1;
                continue;
            }

            report.matched += 1;
            if self.download(file, output_dir).await? {
                report.downloaded += 1;
            } else {
                report.failed += 1;
            }
        }

        // Unpaired labels trail every paired one on the page
        for label in &listing.unpaired {
            if matches_filter(label, filter) {
                tracing::warn!("No document identifier follows file: {}", label);
                report.matched += 1;
                report.unpaired += 1;
            } else {
                tracing::debug!(
                    "Skipping file (doesn't contain '{}'): {}",
                    filter.unwrap_or_default(),
                    label
                );
                report.filtered_out += 1;
            }
        }

        tracing::debug!(
            found = report.found,
            matched = report.matched,
            downloaded = report.downloaded,
            failed = report.failed,
            "Finished page {}",
            address
        );

        Ok(report)
    }

    /// Downloads one document; returns false if it could not be retrieved
    async fn download(&self, file: &FileReference, output_dir: &Path) -> Result<bool, ScraperError> {
        let file_name = sanitize_filename(&file.label);
        if !is_usable_filename(&file_name) {
            tracing::warn!("Skipping file with unusable name: {:?}", file.label);
            return Ok(false);
        }

        let url = match document_url(&self.document_url_template, &file.document_id) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Error downloading {}: {}", file.label, e);
                return Ok(false);
            }
        };

        tracing::info!("Downloading: {}", file.label);
        let bytes = match fetch_document(&self.client, url.as_str()).await.into_body() {
            Ok(bytes) => bytes,
            Err(failure) => {
                tracing::error!("Error downloading {}: {}", file.label, failure);
                return Ok(false);
            }
        };

        let path = write_document(output_dir, &file_name, &bytes).await?;
        tracing::info!("Successfully downloaded: {}", path.display());
        Ok(true)
    }
}
