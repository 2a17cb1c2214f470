//! Integration tests for the archive walker
//!
//! These tests use wiremock to stand in for the council website and check
//! extraction and traversal end-to-end, writing into temporary directories.

use council_docs::config::UserAgentConfig;
use council_docs::crawler::{
    build_http_client, PageExtractor, PageOutcome, Traversal, TraversalOptions,
};
use council_docs::state::{ExhaustionCause, StopReason};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a listing page with the given (label, identifier) pairs
fn listing_page(files: &[(&str, &str)]) -> String {
    let rows: String = files
        .iter()
        .map(|(label, id)| {
            format!(
                r#"<tr>
                    <td><div class="fileName">{}</div></td>
                    <td class="hidden"><div class="pdfString">{}</div></td>
                </tr>"#,
                label, id
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Council Documents</title></head>
        <body><table class="documents">{}</table></body></html>"#,
        rows
    )
}

/// Builds an extractor whose retrieval addresses point at the mock server
fn extractor_for(server: &MockServer) -> PageExtractor {
    let client =
        build_http_client(&UserAgentConfig::default(), None).expect("Failed to build client");
    PageExtractor::new(client, format!("{}/doc?id={{document_id}}", server.uri()))
}

fn listing_url(server: &MockServer, item: &str) -> Url {
    Url::parse(&format!(
        "{}/apps/CouncilDocuments?item={}",
        server.uri(),
        item
    ))
    .expect("Failed to parse listing URL")
}

async fn mount_listing(server: &MockServer, item: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/apps/CouncilDocuments"))
        .and(query_param("item", item))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_document(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/doc"))
        .and(query_param("id", id))
        .respond_with(response)
        .mount(server)
        .await;
}

fn options(dir: &TempDir, max_pages: Option<u32>, filter: Option<&str>) -> TraversalOptions {
    TraversalOptions {
        output_dir: dir.path().to_path_buf(),
        max_pages,
        delay: Duration::ZERO,
        filter: filter.map(str::to_string),
    }
}

#[tokio::test]
async fn test_walk_stops_when_index_exhausted() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "3",
        listing_page(&[("Regular Minutes.pdf", "M3"), ("Agenda.pdf", "A3")]),
    )
    .await;
    mount_listing(&server, "2", listing_page(&[("Agenda.pdf", "A2")])).await;
    mount_listing(&server, "1", listing_page(&[])).await;
    mount_document(
        &server,
        "M3",
        ResponseTemplate::new(200).set_body_bytes(b"%PDF minutes".to_vec()),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let summary = Traversal::new(extractor_for(&server))
        .run(listing_url(&server, "3"), &options(&dir, Some(5), Some("Minutes")))
        .await
        .expect("Traversal failed");

    // item=3, item=2 and item=1 are processed; decrementing item=1 yields nothing
    assert_eq!(summary.pages_processed, 3);
    assert_eq!(summary.total_downloaded, 1);
    assert_eq!(
        summary.stop_reason,
        StopReason::AddressExhausted(ExhaustionCause::IndexExhausted { index: 1 })
    );
    assert!(!summary.stop_reason.is_page_limit());

    let saved = std::fs::read(dir.path().join("Regular Minutes.pdf")).unwrap();
    assert_eq!(saved, b"%PDF minutes");
    assert!(!dir.path().join("Agenda.pdf").exists());
}

#[tokio::test]
async fn test_page_ceiling_of_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/CouncilDocuments"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let summary = Traversal::new(extractor_for(&server))
        .run(listing_url(&server, "47837"), &options(&dir, Some(1), None))
        .await
        .expect("Traversal failed");

    assert_eq!(summary.pages_processed, 1);
    assert_eq!(
        summary.stop_reason,
        StopReason::PageLimitReached { max_pages: 1 }
    );
}

#[tokio::test]
async fn test_empty_page_does_not_stop_walk() {
    let server = MockServer::start().await;

    mount_listing(&server, "2", "<html><body><p>No documents</p></body></html>".to_string())
        .await;
    mount_listing(&server, "1", listing_page(&[("Special Minutes.pdf", "S1")])).await;
    mount_document(
        &server,
        "S1",
        ResponseTemplate::new(200).set_body_bytes(b"special".to_vec()),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let extractor = extractor_for(&server);

    let report = extractor
        .extract(&listing_url(&server, "2"), dir.path(), Some("Minutes"))
        .await
        .unwrap();
    assert_eq!(report.outcome, PageOutcome::Empty);
    assert_eq!(report.downloaded, 0);

    let summary = Traversal::new(extractor)
        .run(listing_url(&server, "2"), &options(&dir, None, Some("Minutes")))
        .await
        .expect("Traversal failed");

    assert_eq!(summary.pages_processed, 2);
    assert_eq!(summary.total_downloaded, 1);
    assert!(dir.path().join("Special Minutes.pdf").exists());
}

#[tokio::test]
async fn test_failed_document_does_not_abort_page() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "10",
        listing_page(&[("Minutes Jan.pdf", "J1"), ("Minutes Feb.pdf", "F2")]),
    )
    .await;
    mount_document(&server, "J1", ResponseTemplate::new(500)).await;
    mount_document(
        &server,
        "F2",
        ResponseTemplate::new(200).set_body_bytes(b"february".to_vec()),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let report = extractor_for(&server)
        .extract(&listing_url(&server, "10"), dir.path(), Some("Minutes"))
        .await
        .unwrap();

    assert_eq!(report.outcome, PageOutcome::Scanned);
    assert_eq!(report.matched, 2);
    assert_eq!(report.downloaded, 1);
    assert_eq!(report.failed, 1);
    assert!(!dir.path().join("Minutes Jan.pdf").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(
        std::fs::read(dir.path().join("Minutes Feb.pdf")).unwrap(),
        b"february"
    );
}

#[tokio::test]
async fn test_unreachable_document_host() {
    let server = MockServer::start().await;
    mount_listing(&server, "4", listing_page(&[("Minutes.pdf", "X")])).await;

    let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
    // Nothing listens on port 1
    let extractor = PageExtractor::new(client, "http://127.0.0.1:1/doc?id={document_id}");

    let dir = TempDir::new().unwrap();
    let report = extractor
        .extract(&listing_url(&server, "4"), dir.path(), None)
        .await
        .unwrap();

    assert_eq!(report.downloaded, 0);
    assert_eq!(report.failed, 1);
    assert!(!dir.path().join("Minutes.pdf").exists());
}

#[tokio::test]
async fn test_filter_selects_labels() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "7",
        listing_page(&[("Regular Minutes.pdf", "R"), ("Agenda.pdf", "A")]),
    )
    .await;
    mount_document(&server, "R", ResponseTemplate::new(200).set_body_bytes(b"r".to_vec())).await;
    mount_document(&server, "A", ResponseTemplate::new(200).set_body_bytes(b"a".to_vec())).await;

    let extractor = extractor_for(&server);

    let filtered_dir = TempDir::new().unwrap();
    let filtered = extractor
        .extract(&listing_url(&server, "7"), filtered_dir.path(), Some("minutes"))
        .await
        .unwrap();
    assert_eq!(filtered.downloaded, 1);
    assert_eq!(filtered.filtered_out, 1);
    assert!(filtered_dir.path().join("Regular Minutes.pdf").exists());
    assert!(!filtered_dir.path().join("Agenda.pdf").exists());

    let all_dir = TempDir::new().unwrap();
    let all = extractor
        .extract(&listing_url(&server, "7"), all_dir.path(), None)
        .await
        .unwrap();
    assert_eq!(all.downloaded, 2);
    assert!(all_dir.path().join("Regular Minutes.pdf").exists());
    assert!(all_dir.path().join("Agenda.pdf").exists());
}

#[tokio::test]
async fn test_labels_are_sanitized_and_output_dir_created() {
    let server = MockServer::start().await;

    mount_listing(
        &server,
        "5",
        listing_page(&[("Minutes 3/15/25: Regular?.pdf", "Q")]),
    )
    .await;
    mount_document(&server, "Q", ResponseTemplate::new(200).set_body_bytes(b"q".to_vec())).await;

    let temp = TempDir::new().unwrap();
    let output = temp.path().join("nested").join("docs");

    let report = extractor_for(&server)
        .extract(&listing_url(&server, "5"), &output, None)
        .await
        .unwrap();

    assert_eq!(report.downloaded, 1);
    assert!(output.join("Minutes 3_15_25_ Regular_.pdf").exists());
}

#[tokio::test]
async fn test_long_label_is_written() {
    let server = MockServer::start().await;
    let label = format!("{}Minutes.pdf", "a".repeat(241));

    mount_listing(&server, "8", listing_page(&[(label.as_str(), "LONG")])).await;
    mount_document(
        &server,
        "LONG",
        ResponseTemplate::new(200).set_body_bytes(b"long".to_vec()),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let summary = Traversal::new(extractor_for(&server))
        .run(listing_url(&server, "8"), &options(&dir, Some(1), Some("Minutes")))
        .await
        .expect("Traversal failed");

    assert_eq!(summary.total_downloaded, 1);
    assert_eq!(std::fs::read(dir.path().join(&label)).unwrap(), b"long");
}

#[tokio::test]
async fn test_listing_fetch_failure_is_local() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/CouncilDocuments"))
        .and(query_param("item", "9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let report = extractor_for(&server)
        .extract(&listing_url(&server, "9"), dir.path(), None)
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        PageOutcome::FetchFailed {
            reason: "HTTP 404".to_string()
        }
    );
    assert_eq!(report.downloaded, 0);
    assert!(dir.path().is_dir());
}

#[tokio::test]
async fn test_unpaired_label_is_skipped() {
    let server = MockServer::start().await;

    let body = format!(
        "{}<div class=\"fileName\">Orphan Minutes.pdf</div>",
        listing_page(&[("Minutes.pdf", "OK")])
    );
    mount_listing(&server, "6", body).await;
    mount_document(&server, "OK", ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec())).await;

    let dir = TempDir::new().unwrap();
    let report = extractor_for(&server)
        .extract(&listing_url(&server, "6"), dir.path(), Some("Minutes"))
        .await
        .unwrap();

    assert_eq!(report.found, 2);
    assert_eq!(report.downloaded, 1);
    assert_eq!(report.unpaired, 1);
    assert!(!dir.path().join("Orphan Minutes.pdf").exists());
}

#[tokio::test]
async fn test_unwritable_output_dir_is_an_error() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = Traversal::new(extractor_for(&server))
        .run(
            listing_url(&server, "3"),
            &TraversalOptions {
                output_dir: blocker.join("docs"),
                max_pages: None,
                delay: Duration::ZERO,
                filter: None,
            },
        )
        .await;

    assert!(result.is_err());
}
