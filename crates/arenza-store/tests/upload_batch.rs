//! Integration tests for `upload_batch`: sequential uploads into the panel
//! state with per-file failure reporting.

use arenza_core::{PanelSize, PanelState};
use serde_json::json;
use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arenza_store::{upload_batch, BackendClient, StoreError, UploadFile};

fn test_client(server: &MockServer) -> BackendClient {
    BackendClient::new(&server.uri(), "anon", "products", 5, "arenza-test/0.1")
        .expect("failed to build test BackendClient")
}

fn file(name: &str, content_type: Option<&str>) -> UploadFile {
    UploadFile {
        name: name.to_owned(),
        content_type: content_type.map(str::to_owned),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

#[tokio::test]
async fn uploads_are_recorded_under_the_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/products/vestido-floral/GG/\d+-frente\.jpg$"))
        .and(header("content-type", "image/jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/products/vestido-floral/GG/\d+-costas\.png$"))
        .and(header("content-type", "image/*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut panel = PanelState::new();
    panel.toggle(PanelSize::GG);

    let report = upload_batch(
        &client,
        &mut panel,
        "Vestido Floral",
        PanelSize::GG,
        vec![file("frente.jpg", Some("image/jpeg")), file("costas.png", None)],
    )
    .await
    .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.uploaded.len(), 2);
    let stored = panel.uploads(PanelSize::GG);
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "frente.jpg");
    assert!(stored[0].path.starts_with("vestido-floral/GG/"));
    assert!(stored[0]
        .url
        .starts_with(&format!("{}/storage/v1/object/public/products/vestido-floral/GG/", server.uri())));

    let variants = panel.materialize();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].size, "GG");
    assert_eq!(variants[0].prints.len(), 2);
}

#[tokio::test]
async fn a_failed_file_does_not_abort_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"-ruim\.jpg$"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({
            "error": "Payload too large",
            "message": "The object exceeded the maximum allowed size"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"-bom\.jpg$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut panel = PanelState::new();
    let report = upload_batch(
        &client,
        &mut panel,
        "Saia",
        PanelSize::M,
        vec![file("ruim.jpg", None), file("bom.jpg", None)],
    )
    .await
    .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].file_name, "ruim.jpg");
    assert!(matches!(report.failed[0].error, StoreError::Backend { status: 413, .. }));
    assert_eq!(report.uploaded.len(), 1);
    assert_eq!(panel.uploads(PanelSize::M).len(), 1);
    assert_eq!(panel.uploads(PanelSize::M)[0].name, "bom.jpg");
}

#[tokio::test]
async fn blank_product_name_fails_before_any_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut panel = PanelState::new();
    let err = upload_batch(&client, &mut panel, "   ", PanelSize::P, vec![file("a.jpg", None)])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingProductName), "got: {err:?}");
    assert!(panel.uploads(PanelSize::P).is_empty());
}

#[tokio::test]
async fn empty_batch_is_a_no_op() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let mut panel = PanelState::new();
    let report = upload_batch(&client, &mut panel, "Saia", PanelSize::P, Vec::new())
        .await
        .unwrap();
    assert!(report.uploaded.is_empty());
    assert!(report.is_clean());
}
