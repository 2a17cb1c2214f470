use crate::url::{DEFAULT_START_URL, DOCUMENT_URL_TEMPLATE};
use serde::Deserialize;

/// Default directory for downloaded documents
pub const DEFAULT_OUTPUT_DIR: &str = "downloaded_documents";

/// Default filename filter
pub const DEFAULT_FILTER: &str = "Minutes";

/// Default pause between listing pages, in seconds
pub const DEFAULT_DELAY_SECS: u64 = 1;

/// Main configuration structure for Council-Docs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Archive walk configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Listing page to start walking back from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Directory the documents are saved into
    pub output: String,

    /// Maximum number of listing pages to process (unlimited when unset)
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Pause between listing pages (seconds)
    pub delay: u64,

    /// Only download files whose name contains this word
    pub filter: Option<String>,

    /// Download every file, ignoring `filter`
    #[serde(rename = "all-documents")]
    pub all_documents: bool,

    /// Retrieval address template, with `{document_id}` as placeholder
    #[serde(rename = "document-url-template")]
    pub document_url_template: String,

    /// Per-request timeout (seconds); requests may block indefinitely when unset
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            output: DEFAULT_OUTPUT_DIR.to_string(),
            max_pages: None,
            delay: DEFAULT_DELAY_SECS,
            filter: Some(DEFAULT_FILTER.to_string()),
            all_documents: false,
            document_url_template: DOCUMENT_URL_TEMPLATE.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ScraperConfig {
    /// Returns the filter word in effect, if any
    ///
    /// `all-documents` and blank filters both disable filtering.
    pub fn effective_filter(&self) -> Option<&str> {
        if self.all_documents {
            return None;
        }

        self.filter.as_deref().filter(|word| !word.is_empty())
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Optional URL or email with information about the operator
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CouncilDocs".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Name/Version` or `Name/Version (+Contact)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}
