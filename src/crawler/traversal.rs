//! Traversal driver - walks the listing archive backwards
//!
//! Starting from one listing address, the driver processes a page, derives
//! the previous page by decrementing its `item` index, pauses, and repeats.
//! It stops when the page ceiling is reached or no previous address exists.
//!
//! Pages are processed strictly one after another. The pause only happens
//! when another page follows, never after the last one.

use crate::crawler::extractor::{PageExtractor, PageOutcome};
use crate::output::TraversalSummary;
use crate::state::{ExhaustionCause, StopReason, TraversalState};
use crate::ScraperError;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Options for a traversal
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    /// Directory the documents are written into
    pub output_dir: PathBuf,

    /// Maximum number of pages to process; unlimited when `None`
    pub max_pages: Option<u32>,

    /// Pause between consecutive pages
    pub delay: Duration,

    /// Optional case-insensitive word file labels must contain
    pub filter: Option<String>,
}

/// Drives a [`PageExtractor`] over successive listing addresses
pub struct Traversal {
    extractor: PageExtractor,
}

impl Traversal {
    /// Creates a traversal over the given extractor
    pub fn new(extractor: PageExtractor) -> Self {
        Self { extractor }
    }

    /// Runs the traversal to completion
    ///
    /// # Arguments
    ///
    /// * `start` - The first listing address to process
    /// * `options` - Output directory, page ceiling, delay and filter
    ///
    /// # Returns
    ///
    /// * `Ok(TraversalSummary)` - Pages processed, documents downloaded and stop reason
    /// * `Err(ScraperError)` - A filesystem error stopped the traversal
    pub async fn run(
        &self,
        start: Url,
        options: &TraversalOptions,
    ) -> Result<TraversalSummary, ScraperError> {
        let started_at = Utc::now();
        let mut state = TraversalState::start(start);
        let mut pages_processed: u32 = 0;
        let mut total_downloaded: usize = 0;

        let stop_reason = loop {
            let current = match state {
                TraversalState::Active(url) => url,
                TraversalState::Done(reason) => break reason,
            };

            pages_processed += 1;
            match options.max_pages {
                Some(max) => tracing::info!("Processing page {}/{}", pages_processed, max),
                None => tracing::info!("Processing page {}", pages_processed),
            }

            let report = self
                .extractor
                .extract(&current, &options.output_dir, options.filter.as_deref())
                .await?;
            total_downloaded += report.downloaded;

            if let PageOutcome::FetchFailed { reason } = &report.outcome {
                tracing::debug!("Page {} contributed nothing: {}", current, reason);
            }

            state = TraversalState::after_page(&current, pages_processed, options.max_pages);

            match &state {
                TraversalState::Active(_) => tokio::time::sleep(options.delay).await,
                TraversalState::Done(reason) => log_stop(&current, reason),
            }
        };

        Ok(TraversalSummary {
            pages_processed,
            total_downloaded,
            stop_reason,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Logs a malformed address distinctly from a normal stop
fn log_stop(last: &Url, reason: &StopReason) {
    match reason {
        StopReason::AddressExhausted(ExhaustionCause::MissingIndex) => {
            tracing::error!("No item parameter found in URL: {}", last);
        }
        StopReason::AddressExhausted(ExhaustionCause::InvalidIndex { value }) => {
            tracing::error!("Error parsing item parameter {:?} in URL: {}", value, last);
        }
        _ => tracing::debug!("Traversal finished after {}: {}", last, reason),
    }
}
