//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `TraversalState`: Active/Done state of the archive walk
//! - `StopReason`: Why a walk ended (page ceiling vs. exhausted addresses)
//! - `ExhaustionCause`: Why no further listing address could be derived

mod traversal_state;

// Re-export main types
pub use traversal_state::{ExhaustionCause, StopReason, TraversalState};
