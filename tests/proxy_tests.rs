// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forwarding endpoint tests against an in-memory transport.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use notion_relay::config::Config;
use notion_relay::error::AppError;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::MockUpstream;

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn header<'a>(req: &'a notion_relay::services::UpstreamRequest, name: &str) -> Option<&'a str> {
    req.headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_missing_key_never_calls_upstream() {
    let upstream = MockUpstream::replying(200, "{}");
    let config = Config {
        notion_api_key: None,
        ..Config::default()
    };

    for (method, uri) in [
        ("GET", "/api/users/me"),
        ("POST", "/api/databases/db1/query"),
        ("PATCH", "/api/pages/p1"),
        ("DELETE", "/api/blocks/b1"),
    ] {
        let app = common::create_test_app(config.clone(), upstream.clone());
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], AppError::MissingApiKey.to_string());
    }

    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn test_get_forwards_without_body() {
    let upstream = MockUpstream::replying(200, r#"{"object":"user"}"#);
    let app = common::create_test_app(Config::default(), upstream.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "object": "user" }));

    let call = upstream.last_call();
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.url, "https://api.notion.com/v1/users/me");
    assert!(call.body.is_none());
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn test_post_with_empty_object_sends_literal_braces() {
    let upstream = MockUpstream::replying(200, r#"{"results":[]}"#);
    let app = common::create_test_app(Config::default(), upstream.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/databases/db1/query")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let call = upstream.last_call();
    assert_eq!(call.url, "https://api.notion.com/v1/databases/db1/query");
    assert_eq!(call.body.as_deref(), Some("{}"));
}

#[tokio::test]
async fn test_injects_auth_and_version_headers() {
    let upstream = MockUpstream::replying(200, "{}");
    let app = common::create_test_app(Config::default(), upstream.clone());

    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri("/api/pages/p1")
            .header("authorization", "Bearer client-supplied")
            .body(Body::from(r#"{"properties":{"Аватар":{"url":null}}}"#))
            .unwrap(),
    )
    .await
    .unwrap();

    let call = upstream.last_call();
    assert_eq!(header(&call, "authorization"), Some("Bearer test_notion_key"));
    assert_eq!(header(&call, "notion-version"), Some("2022-06-28"));
    assert_eq!(header(&call, "content-type"), Some("application/json"));

    let sent: Value = serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
    assert_eq!(sent, json!({ "properties": { "Аватар": { "url": null } } }));
}

#[tokio::test]
async fn test_query_string_preserved() {
    let upstream = MockUpstream::replying(200, "{}");
    let app = common::create_test_app(Config::default(), upstream.clone());

    app.oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/users?page_size=10")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(
        upstream.last_call().url,
        "https://api.notion.com/v1/users?page_size=10"
    );
}

#[tokio::test]
async fn test_upstream_error_relayed_verbatim() {
    let notion_error = json!({
        "object": "error",
        "status": 400,
        "code": "validation_error",
        "message": "body failed validation: body.properties.Почта.email should be a string"
    });
    let upstream = MockUpstream::replying(400, &notion_error.to_string());
    let app = common::create_test_app(Config::default(), upstream);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/pages")
                .body(Body::from(r#"{"properties":{}, "parent":{"database_id":"db1"}}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, notion_error);
}

#[tokio::test]
async fn test_transport_failure_is_generic_500() {
    let upstream = MockUpstream::failing();
    let app = common::create_test_app(Config::default(), upstream.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/databases/db1/query")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["message"], AppError::INTERNAL_MESSAGE);
    assert!(!json.to_string().contains("connection refused"));
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn test_non_json_upstream_is_generic_500() {
    let upstream = MockUpstream::replying(502, "<html>Bad Gateway</html>");
    let app = common::create_test_app(Config::default(), upstream);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["message"], AppError::INTERNAL_MESSAGE);
}

#[tokio::test]
async fn test_invalid_inbound_json_is_rejected_before_upstream() {
    let upstream = MockUpstream::replying(200, "{}");
    let app = common::create_test_app(Config::default(), upstream.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/pages")
                .body(Body::from("{oops"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn test_health_check() {
    let app = common::create_test_app(Config::default(), MockUpstream::replying(200, "{}"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}
