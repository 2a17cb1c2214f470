use crate::url::ITEM_PARAM;
use url::form_urlencoded;
use url::Url;

/// Outcome of stepping a listing address back by one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrement {
    /// The address of the previous listing page
    Next(Url),

    /// The item index is already at the lower bound (1 or less)
    Exhausted {
        /// The index found on the address
        index: i128,
    },

    /// The address has no `item` parameter, or it is blank
    MissingIndex,

    /// The `item` parameter is not an integer in the `i128` range
    InvalidIndex {
        /// The raw value that failed to parse
        value: String,
    },
}

impl Decrement {
    /// Returns the next address, discarding the reason when there is none
    pub fn into_next(self) -> Option<Url> {
        match self {
            Self::Next(url) => Some(url),
            _ => None,
        }
    }

    /// Returns true if the address was malformed rather than exhausted
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MissingIndex | Self::InvalidIndex { .. })
    }
}

/// Decrements the `item` query parameter of a listing address
///
/// Only the value of the first `item` pair is rewritten. Every other byte of
/// the address, including the encoding and order of the remaining query
/// pairs, is carried over unchanged. An index of 1 or less is never
/// decremented. Indices are read as `i128`, so only values beyond that range
/// count as invalid.
///
/// # Examples
///
/// ```
/// use council_docs::url::{decrement_item, Decrement};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/apps/CouncilDocuments?item=3&view=list").unwrap();
/// let next = decrement_item(&url).into_next().unwrap();
/// assert_eq!(next.as_str(), "https://example.com/apps/CouncilDocuments?item=2&view=list");
///
/// let last = Url::parse("https://example.com/apps/CouncilDocuments?item=1").unwrap();
/// assert_eq!(decrement_item(&last), Decrement::Exhausted { index: 1 });
/// ```
pub fn decrement_item(url: &Url) -> Decrement {
    let query = match url.query() {
        Some(q) => q,
        None => return Decrement::MissingIndex,
    };

    let mut segments: Vec<String> = query.split('&').map(str::to_string).collect();

    let Some((position, raw_key, value)) = find_item(&segments) else {
        return Decrement::MissingIndex;
    };

    let index = match value.trim().parse::<i128>() {
        Ok(i) => i,
        Err(_) => return Decrement::InvalidIndex { value },
    };

    if index <= 1 {
        return Decrement::Exhausted { index };
    }

    segments[position] = format!("{}={}", raw_key, index - 1);

    let mut next = url.clone();
    next.set_query(Some(&segments.join("&")));
    Decrement::Next(next)
}

/// Finds the first `item` pair, returning its position, raw key and decoded value
///
/// Blank values count as absent.
fn find_item(segments: &[String]) -> Option<(usize, String, String)> {
    segments.iter().enumerate().find_map(|(position, segment)| {
        let raw_key = segment.split_once('=').map_or(segment.as_str(), |(k, _)| k);
        let (key, value) = form_urlencoded::parse(segment.as_bytes()).next()?;

        if key != ITEM_PARAM || value.trim().is_empty() {
            return None;
        }

        Some((position, raw_key.to_string(), value.into_owned()))
    })
}
