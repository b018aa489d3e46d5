use serde_json::json;
use transform_models::{ErrorResponse, TransformResponse};
use transform_sandbox::test_helpers::UPPERCASE_ID_SCRIPT;

use crate::helpers::*;

#[tokio::test]
async fn transform_returns_string_result() {
    let server = TestServer::new().await;

    let resp = server
        .post_json("/api/transform", &json!({ "script": UPPERCASE_ID_SCRIPT, "input": { "id": "abc" } }))
        .await;

    assert_eq!(resp.status(), 200);
    let body: TransformResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.result, Some("ABC".to_string()));

    server.cleanup();
}

#[tokio::test]
async fn transform_null_result() {
    let server = TestServer::new().await;

    let resp = server
        .post_json("/api/transform", &json!({ "script": "function build() { return null; }" }))
        .await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "result": null }));

    server.cleanup();
}

#[tokio::test]
async fn transform_validation_failure_is_bad_request() {
    let server = TestServer::new().await;

    let resp = server
        .post_json("/api/transform", &json!({ "script": UPPERCASE_ID_SCRIPT, "input": {} }))
        .await;

    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.message, "INVALID_DATA");
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].message, "missing id");

    server.cleanup();
}

#[tokio::test]
async fn transform_script_error_is_bad_request() {
    let server = TestServer::new().await;

    let resp = server
        .post_json("/api/transform", &json!({ "script": "function build( {", "input": {} }))
        .await;

    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = resp.json().await.expect("Failed to parse JSON");
    assert!(body.errors[0].message.contains("SyntaxError"));

    server.cleanup();
}

#[tokio::test]
async fn transform_non_string_output_is_bad_request() {
    let server = TestServer::new().await;

    let resp = server
        .post_json("/api/transform", &json!({ "script": "function build() { return 42; }" }))
        .await;

    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.message, "INVALID_DATA");

    server.cleanup();
}

#[tokio::test]
async fn transform_undefined_output_is_internal_error() {
    let server = TestServer::new().await;

    let resp = server
        .post_json("/api/transform", &json!({ "script": "function build() {}" }))
        .await;

    assert_eq!(resp.status(), 500);

    server.cleanup();
}

#[tokio::test]
async fn transform_rejects_missing_script() {
    let server = TestServer::new().await;

    let resp = server.post_json("/api/transform", &json!({ "input": {} })).await;

    assert!(resp.status().is_client_error());

    server.cleanup();
}
