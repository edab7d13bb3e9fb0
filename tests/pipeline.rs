//! End-to-end pipeline tests against mock identity, Graph, and download
//! endpoints.

use onedrive_dl::share::encode_share_link;
use onedrive_dl::{Config, Endpoints, ShareDownloader};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHARE_LINK: &str = "https://1drv.ms/u/s!AkF3qhOJ2-test";

/// Build a config whose identity and Graph endpoints both point at `server`,
/// downloading into `download_dir`.
fn test_config(server: &MockServer, download_dir: &std::path::Path) -> Config {
    Config {
        client_id: "client-1".to_string(),
        client_secret: "secret-1".to_string(),
        tenant_id: "tenant-1".to_string(),
        share_link: SHARE_LINK.to_string(),
        download_dir: download_dir.to_path_buf(),
        endpoints: Endpoints {
            login_base: server.uri(),
            graph_base: server.uri(),
        },
        request_timeout: None,
    }
}

/// Mount a successful token endpoint returning `access_token`.
async fn mount_token_endpoint(server: &MockServer, access_token: &str) {
    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "access_token": access_token })),
        )
        .mount(server)
        .await;
}

fn drive_item_path() -> String {
    format!("/shares/{}/driveItem", encode_share_link(SHARE_LINK))
}

#[tokio::test]
async fn full_pipeline_downloads_file_and_reports_name() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, "T").await;
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@microsoft.graph.downloadUrl": format!("{}/content/report.pdf", server.uri()),
            "name": "report.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/content/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".as_slice()))
        .expect(1)
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let outcome = downloader.run().await.unwrap();

    assert_eq!(outcome.file_name, "report.pdf");
    let contents = std::fs::read(dir.path().join("report.pdf")).unwrap();
    assert_eq!(contents, b"hello");
}

#[tokio::test]
async fn missing_input_fails_without_any_network_call() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // Any request hitting the server would trip this catch-all expectation.
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&server, dir.path());
    config.client_secret.clear();

    let downloader = ShareDownloader::new(config).unwrap();
    let err = downloader.run().await.unwrap_err();
    assert_eq!(err.to_string(), "Missing required inputs.");
}

#[tokio::test]
async fn missing_download_url_fails_without_download_call() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, "T").await;
    // driveItem resolves fine but the item has no download URL.
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "report.pdf" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/content/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let err = downloader.run().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to retrieve download URL.");
    assert!(!dir.path().join("report.pdf").exists());
}

#[tokio::test]
async fn empty_download_url_is_treated_as_missing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, "T").await;
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@microsoft.graph.downloadUrl": "",
            "name": "report.pdf"
        })))
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let err = downloader.run().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to retrieve download URL.");
}

#[tokio::test]
async fn token_endpoint_failure_short_circuits_pipeline() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_scope"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let err = downloader.run().await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("token request failed: "), "got: {msg}");
    assert!(msg.contains("invalid_scope"));
}

#[tokio::test]
async fn empty_access_token_fails_before_metadata_lookup() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, "").await;
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let err = downloader.run().await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("token request failed: "), "got: {msg}");
    assert!(msg.contains("empty token"));
}

#[tokio::test]
async fn metadata_failure_short_circuits_pipeline() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, "T").await;
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"itemNotFound"}"#))
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let err = downloader.run().await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("share resolution failed: "), "got: {msg}");
    assert!(msg.contains("itemNotFound"));
}

#[tokio::test]
async fn download_failure_is_reported_with_stage_prefix() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, "T").await;
    Mock::given(method("GET"))
        .and(path(drive_item_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@microsoft.graph.downloadUrl": format!("{}/content/report.pdf", server.uri()),
            "name": "report.pdf"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/content/report.pdf"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let downloader = ShareDownloader::new(test_config(&server, dir.path())).unwrap();
    let err = downloader.run().await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("download failed: "), "got: {msg}");
    assert!(msg.contains("503"));
    // No partial file is left behind.
    assert!(!dir.path().join("report.pdf").exists());
}
