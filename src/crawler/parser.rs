//! HTML parser for extracting file references from a listing page
//!
//! A listing page renders each downloadable file as a `div.fileName` holding
//! the human-readable label and, somewhere after it, a `div.pdfString`
//! holding the document identifier. The two are not nested, so they are
//! paired by position: each label takes the first identifier that follows it
//! in document order.
//!
//! This is a positional policy. If the page ever renders two labels ahead of
//! their identifiers, both labels pair with the same (first) identifier.

use scraper::{ElementRef, Html, Selector};

/// Selector for the label marker
const FILE_NAME_SELECTOR: &str = "div.fileName";

/// Selector for the identifier marker
const DOCUMENT_ID_SELECTOR: &str = "div.pdfString";

/// A downloadable file found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Label shown on the page, used as the saved file name
    pub label: String,

    /// Opaque identifier used to build the retrieval address
    pub document_id: String,
}

/// Extracted information from a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedListing {
    /// Labels paired with their identifiers, in page order
    pub files: Vec<FileReference>,

    /// Labels with no identifier marker after them
    ///
    /// These all come after the last identifier, so they follow every entry
    /// of `files` in page order.
    pub unpaired: Vec<String>,
}

impl ParsedListing {
    /// Number of label markers found on the page
    pub fn label_count(&self) -> usize {
        self.files.len() + self.unpaired.len()
    }

    /// Returns true if the page had no label markers at all
    pub fn is_empty(&self) -> bool {
        self.label_count() == 0
    }
}

/// Marker kinds in document order
enum Marker {
    Label(String),
    DocumentId(String),
}

/// Parses a listing page and pairs labels with document identifiers
///
/// # Example
///
/// ```
/// use council_docs::crawler::parse_listing;
///
/// let html = r#"<div class="fileName">Regular Minutes.pdf</div>
///               <div class="pdfString">ABC123</div>"#;
/// let parsed = parse_listing(html);
/// assert_eq!(parsed.files[0].label, "Regular Minutes.pdf");
/// assert_eq!(parsed.files[0].document_id, "ABC123");
/// ```
pub fn parse_listing(html: &str) -> ParsedListing {
    let document = Html::parse_document(html);
    let markers = collect_markers(&document);

    // Walk backwards so the nearest following identifier is always at hand
    let mut next_id: Option<&str> = None;
    let mut files = Vec::new();
    let mut unpaired = Vec::new();

    for marker in markers.iter().rev() {
        match marker {
            Marker::DocumentId(id) => next_id = Some(id.as_str()),
            Marker::Label(label) => match next_id {
                Some(id) => files.push(FileReference {
                    label: label.clone(),
                    document_id: id.to_string(),
                }),
                None => unpaired.push(label.clone()),
            },
        }
    }

    files.reverse();
    unpaired.reverse();

    ParsedListing { files, unpaired }
}

/// Collects label and identifier markers in document order
fn collect_markers(document: &Html) -> Vec<Marker> {
    let combined = format!("{}, {}", FILE_NAME_SELECTOR, DOCUMENT_ID_SELECTOR);
    let (Ok(selector), Ok(label_selector)) =
        (Selector::parse(&combined), Selector::parse(FILE_NAME_SELECTOR))
    else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| {
            let text = element_text(&element);
            if label_selector.matches(&element) {
                Marker::Label(text)
            } else {
                Marker::DocumentId(text)
            }
        })
        .collect()
}

/// Returns the trimmed text content of an element
fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
