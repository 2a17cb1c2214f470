//! End-of-run summary for a traversal

use crate::state::StopReason;
use chrono::{DateTime, Utc};
use std::fmt;

/// Totals for one traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Number of listing pages processed
    pub pages_processed: u32,

    /// Number of documents written to disk
    pub total_downloaded: usize,

    /// Why the traversal stopped
    pub stop_reason: StopReason,

    /// When the first page was requested
    pub started_at: DateTime<Utc>,

    /// When the traversal stopped
    pub finished_at: DateTime<Utc>,
}

impl TraversalSummary {
    /// Wall-clock duration of the traversal in whole seconds
    pub fn elapsed_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Logs the stop reason and totals
    pub fn log(&self) {
        tracing::info!(
            reason = self.stop_reason.as_str(),
            "{}. Stopping.",
            capitalize(&self.stop_reason.to_string())
        );
        tracing::info!("{}", self);
    }
}

impl fmt::Display for TraversalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Download complete. Processed {} pages. Downloaded {} documents in {}s.",
            self.pages_processed,
            self.total_downloaded,
            self.elapsed_seconds()
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
