/// Traversal state definitions for the archive walk
///
/// The walk is a two-state machine: it is `Active` while there is a listing
/// address to process, and becomes `Done` with a reason once it stops.
use crate::url::{decrement_item, Decrement};
use std::fmt;
use url::Url;

/// Why the address sequence ran out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustionCause {
    /// The item index reached its lower bound
    IndexExhausted { index: i128 },

    /// The address carried no item index
    MissingIndex,

    /// The item index could not be parsed as an integer
    InvalidIndex { value: String },
}

/// Why a traversal stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page ceiling was reached
    PageLimitReached { max_pages: u32 },

    /// No further listing address could be derived
    AddressExhausted(ExhaustionCause),
}

impl StopReason {
    /// Returns true if the walk stopped because of the page ceiling
    pub fn is_page_limit(&self) -> bool {
        matches!(self, Self::PageLimitReached { .. })
    }

    /// Returns true if the walk ran out of addresses
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::AddressExhausted(_))
    }

    /// Returns a short machine-friendly label for the reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageLimitReached { .. } => "page_limit_reached",
            Self::AddressExhausted(ExhaustionCause::IndexExhausted { .. }) => "index_exhausted",
            Self::AddressExhausted(ExhaustionCause::MissingIndex) => "missing_index",
            Self::AddressExhausted(ExhaustionCause::InvalidIndex { .. }) => "invalid_index",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageLimitReached { max_pages } => {
                write!(f, "reached maximum number of pages ({})", max_pages)
            }
            Self::AddressExhausted(ExhaustionCause::IndexExhausted { index }) => {
                write!(f, "no more pages to process (item index {})", index)
            }
            Self::AddressExhausted(ExhaustionCause::MissingIndex) => {
                write!(f, "no item parameter found in URL")
            }
            Self::AddressExhausted(ExhaustionCause::InvalidIndex { value }) => {
                write!(f, "item parameter is not an integer: {:?}", value)
            }
        }
    }
}

/// Current state of a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalState {
    /// A listing address is waiting to be processed
    Active(Url),

    /// The traversal has stopped
    Done(StopReason),
}

impl TraversalState {
    /// Creates the initial state for a start address
    pub fn start(address: Url) -> Self {
        Self::Active(address)
    }

    /// Computes the state following a processed page
    ///
    /// The page ceiling is checked first, so a walk that hits it never
    /// decrements the address it just processed.
    ///
    /// # Arguments
    ///
    /// * `processed` - The address that was just processed
    /// * `pages_processed` - Pages processed so far, including `processed`
    /// * `max_pages` - Optional page ceiling
    pub fn after_page(processed: &Url, pages_processed: u32, max_pages: Option<u32>) -> Self {
        if let Some(max_pages) = max_pages {
            if pages_processed >= max_pages {
                return Self::Done(StopReason::PageLimitReached { max_pages });
            }
        }

        match decrement_item(processed) {
            Decrement::Next(next) => Self::Active(next),
            Decrement::Exhausted { index } => {
                Self::Done(StopReason::AddressExhausted(ExhaustionCause::IndexExhausted {
                    index,
                }))
            }
            Decrement::MissingIndex => {
                Self::Done(StopReason::AddressExhausted(ExhaustionCause::MissingIndex))
            }
            Decrement::InvalidIndex { value } => Self::Done(StopReason::AddressExhausted(
                ExhaustionCause::InvalidIndex { value },
            )),
        }
    }

    /// Returns true if another page will be processed
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Returns true if this is the terminal state
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}
