//! URL handling module for Council-Docs
//!
//! This module knows the two address shapes the scraper deals with: listing
//! pages, which carry the `item` index in their query string, and document
//! retrieval addresses, which are built from a fixed template.

mod pagination;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use pagination::{decrement_item, Decrement};

/// Query key holding the item index of a listing page
pub const ITEM_PARAM: &str = "item";

/// Placeholder substituted with a document identifier
pub const DOCUMENT_ID_PLACEHOLDER: &str = "{document_id}";

/// Retrieval address template for council documents
pub const DOCUMENT_URL_TEMPLATE: &str = "https://www.cityoftulsa.org/apps/COTDisplayDocument?DocumentType=CouncilDocument&DocumentIdentifiers={document_id}";

/// Most recent listing page known when the archive walk was first set up
pub const DEFAULT_START_URL: &str = "https://www.cityoftulsa.org/apps/CouncilDocuments?item=47837";

/// Parses a listing page address
///
/// Only HTTP and HTTPS addresses are accepted.
///
/// # Examples
///
/// ```
/// use council_docs::url::parse_page_url;
///
/// let url = parse_page_url("https://example.com/apps/CouncilDocuments?item=3").unwrap();
/// assert_eq!(url.query(), Some("item=3"));
/// assert!(parse_page_url("ftp://example.com/?item=3").is_err());
/// ```
pub fn parse_page_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Builds the retrieval address for a document identifier
///
/// The identifier is substituted verbatim for `{document_id}` in `template`.
///
/// # Examples
///
/// ```
/// use council_docs::url::{document_url, DOCUMENT_URL_TEMPLATE};
///
/// let url = document_url(DOCUMENT_URL_TEMPLATE, "ABC123").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.cityoftulsa.org/apps/COTDisplayDocument?DocumentType=CouncilDocument&DocumentIdentifiers=ABC123"
/// );
/// ```
pub fn document_url(template: &str, document_id: &str) -> Result<Url, UrlError> {
    if !template.contains(DOCUMENT_ID_PLACEHOLDER) {
        return Err(UrlError::MissingPlaceholder(template.to_string()));
    }

    let filled = template.replace(DOCUMENT_ID_PLACEHOLDER, document_id);
    parse_page_url(&filled)
}
