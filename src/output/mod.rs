//! Output module for downloaded documents and run reports
//!
//! This module handles:
//! - Turning page labels into safe file names
//! - Writing documents into the output directory
//! - Summarising a finished traversal

mod files;
mod summary;

pub use files::{ensure_output_dir, is_usable_filename, sanitize_filename, write_document};
pub use summary::TraversalSummary;
