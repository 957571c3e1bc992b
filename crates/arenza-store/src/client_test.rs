use super::*;

fn client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, "anon-key", "products", 5, "arenza-test/0.1")
        .expect("failed to build test client")
}

#[test]
fn new_trims_trailing_slashes() {
    let c = client("https://abc.supabase.co//");
    assert_eq!(c.base_url(), "https://abc.supabase.co");
}

#[test]
fn new_rejects_non_http_url() {
    let result = BackendClient::new("abc.supabase.co", "k", "products", 5, "ua");
    assert!(matches!(result, Err(StoreError::InvalidUrl { .. })));
}

#[test]
fn new_rejects_scheme_without_host() {
    let result = BackendClient::new("https://", "k", "products", 5, "ua");
    assert!(matches!(result, Err(StoreError::InvalidUrl { .. })));
}

#[test]
fn endpoint_joins_without_double_slash() {
    let c = client("https://abc.supabase.co/");
    assert_eq!(
        c.endpoint("/rest/v1/products"),
        "https://abc.supabase.co/rest/v1/products"
    );
}

#[test]
fn object_path_layout() {
    assert_eq!(
        object_path("vestido-floral", "GG", 1_700_000_000_000, "frente.jpg"),
        "vestido-floral/GG/1700000000000-frente.jpg"
    );
}

#[test]
fn public_url_points_at_public_bucket() {
    let c = client("https://abc.supabase.co");
    assert_eq!(
        c.public_url("vestido-floral/P/1-frente.jpg"),
        "https://abc.supabase.co/storage/v1/object/public/products/vestido-floral/P/1-frente.jpg"
    );
}

#[test]
fn public_url_percent_encodes_segments() {
    let c = client("https://abc.supabase.co");
    assert_eq!(
        c.public_url("saia/M/1-foto da frente.jpg"),
        "https://abc.supabase.co/storage/v1/object/public/products/saia/M/1-foto%20da%20frente.jpg"
    );
}

#[test]
fn backend_message_prefers_message_field() {
    let body = r#"{"message":"duplicate key","error":"conflict"}"#;
    assert_eq!(backend_message(body).as_deref(), Some("duplicate key"));
}

#[test]
fn backend_message_reads_auth_fields() {
    assert_eq!(
        backend_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
            .as_deref(),
        Some("Invalid login credentials")
    );
    assert_eq!(
        backend_message(r#"{"msg":"User already registered"}"#).as_deref(),
        Some("User already registered")
    );
}

#[test]
fn backend_message_none_for_non_json_or_blank() {
    assert_eq!(backend_message("<html>bad gateway</html>"), None);
    assert_eq!(backend_message(r#"{"message":"  "}"#), None);
}

#[test]
fn signed_out_client_has_no_user() {
    let c = client("https://abc.supabase.co");
    assert!(c.current_user().is_none());
    assert!(c.subscribe_session().borrow().is_none());
}
