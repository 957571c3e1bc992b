//! Integration tests for `Storefront`: cache refresh, session sync and the
//! admin gate on mutations.

use arenza_core::{ProductDraft, ProductId, Variant};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arenza_store::{BackendClient, StoreError, Storefront};

const ADMIN: &str = "admin@arenza.com.br";

fn storefront(server: &MockServer) -> Storefront {
    let client = BackendClient::new(&server.uri(), "anon", "products", 5, "arenza-test/0.1")
        .expect("failed to build test BackendClient");
    Storefront::new(client, Some(ADMIN.to_owned()))
}

async fn mount_sign_in(server: &MockServer, email: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token",
            "refresh_token": "refresh",
            "user": { "id": "u", "email": email }
        })))
        .mount(server)
        .await;
}

fn draft() -> ProductDraft {
    ProductDraft {
        name: "Vestido".into(),
        price: "189.90".into(),
        description: String::new(),
        image: String::new(),
        variants: vec![Variant::new("P", vec!["Floral".into()])],
    }
}

#[tokio::test]
async fn refresh_parses_every_row_variant_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "A", "size_variants": "[{\"size\":\"P\",\"prints\":[\"Floral\"]}]" },
            { "id": 2, "name": "B", "variants": { "tamanho": "M", "estampas": "Liso, Xadrez" } },
            { "id": 3, "name": "C", "variant_options": { "G": ["Listrado"] } },
            { "id": 4, "name": "D", "size_variants": "{broken" }
        ])))
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store.refresh().await.unwrap();

    let variants: Vec<_> = store.products().iter().map(|p| p.variants.clone()).collect();
    assert_eq!(variants[0], vec![Variant::new("P", vec!["Floral".into()])]);
    assert_eq!(
        variants[1],
        vec![Variant::new("M", vec!["Liso".into(), "Xadrez".into()])]
    );
    assert_eq!(variants[2], vec![Variant::new("G", vec!["Listrado".into()])]);
    assert!(variants[3].is_empty());
    assert!(store.product(&ProductId::new("3")).is_some());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "A" }])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store.refresh().await.unwrap();
    assert!(store.refresh().await.is_err());
    assert_eq!(store.products().len(), 1);
}

#[tokio::test]
async fn create_requires_sign_in_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    let err = store.create(&draft()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotSignedIn), "got: {err:?}");
}

#[tokio::test]
async fn non_admin_cannot_mutate() {
    let server = MockServer::start().await;
    mount_sign_in(&server, "cliente@example.com").await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store
        .client()
        .sign_in("cliente@example.com", "secret")
        .await
        .unwrap();
    assert!(!store.sync_session());
    assert!(store.current_user().is_some());
    assert!(!store.is_admin());

    let err = store.delete(&ProductId::new("1")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotAdmin), "got: {err:?}");
}

#[tokio::test]
async fn admin_create_refetches_catalog() {
    let server = MockServer::start().await;
    mount_sign_in(&server, ADMIN).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "name": "Vestido",
            "price": 189.9,
            "size_variants": "[{\"size\":\"P\",\"prints\":[\"Floral\"]}]"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store.client().sign_in(ADMIN, "secret").await.unwrap();
    assert!(store.sync_session());
    assert!(store.is_admin());

    store.create(&draft()).await.unwrap();
    assert_eq!(store.products().len(), 1);
    assert_eq!(store.products()[0].card(None).selected_size, Some("P"));
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    mount_sign_in(&server, ADMIN).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store.client().sign_in(ADMIN, "secret").await.unwrap();
    store.sync_session();

    let bad = ProductDraft {
        price: "0".into(),
        ..draft()
    };
    let err = store.create(&bad).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)), "got: {err:?}");
}

#[tokio::test]
async fn failed_update_leaves_cache_untouched() {
    let server = MockServer::start().await;
    mount_sign_in(&server, ADMIN).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "Antigo" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "new row violates row-level security policy"
        })))
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store.refresh().await.unwrap();
    store.client().sign_in(ADMIN, "secret").await.unwrap();
    store.sync_session();

    let err = store.update(&ProductId::new("1"), &draft()).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend { status: 403, .. }), "got: {err:?}");
    assert_eq!(store.products()[0].row.name(), "Antigo");
}

#[tokio::test]
async fn sign_out_drops_admin_status() {
    let server = MockServer::start().await;
    mount_sign_in(&server, ADMIN).await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut store = storefront(&server);
    store.client().sign_in(ADMIN, "secret").await.unwrap();
    store.sync_session();
    assert!(store.is_admin());

    store.client().sign_out().await.unwrap();
    assert!(store.sync_session());
    assert!(!store.is_admin());
    assert!(store.current_user().is_none());
}
