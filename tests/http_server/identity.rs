use serde_json::json;
use transform_models::{ErrorResponse, IdentityResponse};
use transform_sandbox::{identity::hash_identity, test_helpers::UPPERCASE_ID_SCRIPT};

use crate::helpers::*;

#[tokio::test]
async fn identity_is_hash_of_factory_output() {
    let server = TestServer::with_identity_factory(Some(UPPERCASE_ID_SCRIPT)).await;

    let resp = server.post_json("/api/identity", &json!({ "data": { "id": "abc" } })).await;

    assert_eq!(resp.status(), 200);
    let body: IdentityResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.identity.map(|i| i.number), Some(hash_identity("ABC")));

    server.cleanup();
}

#[tokio::test]
async fn identity_null_output_has_no_identity() {
    let server = TestServer::with_identity_factory(Some(UPPERCASE_ID_SCRIPT)).await;

    let resp = server.post_json("/api/identity", &json!({ "data": { "id": "none" } })).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "identity": null }));

    server.cleanup();
}

#[tokio::test]
async fn identity_validation_failure_is_bad_request() {
    let server = TestServer::with_identity_factory(Some(UPPERCASE_ID_SCRIPT)).await;

    let resp = server.post_json("/api/identity", &json!({ "data": {} })).await;

    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.errors[0].message, "missing id");

    server.cleanup();
}

#[tokio::test]
async fn identity_without_factory_is_not_found() {
    let server = TestServer::new().await;

    let resp = server.post_json("/api/identity", &json!({ "data": { "id": "abc" } })).await;

    assert_eq!(resp.status(), 404);

    server.cleanup();
}
