//! `/api/data` through the full router stack

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use sales_intel::api::build_router;

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/data")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_get_ignores_query() {
    let expected = json!({
        "success": true,
        "data": [],
        "message": "API endpoint ready for integration"
    });

    for uri in [
        "/api/data",
        "/api/data?type=personas",
        "/api/data?type=",
        "/api/data?type=a&type=b",
        "/api/data?%%%&&=",
    ] {
        let (status, body) = send(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, expected, "{uri}");
    }
}

#[tokio::test]
async fn test_post_acknowledges_json() {
    for payload in [r#"{"persona":"cio","notes":[1,2,3]}"#, "[]", "42", "null"] {
        let (status, body) = send(post(payload)).await;
        assert_eq!(status, StatusCode::OK, "{payload}");
        assert_eq!(
            body,
            json!({"success": true, "message": "Data updated successfully"})
        );
    }
}

#[tokio::test]
async fn test_post_never_echoes_body() {
    let (_, body) = send(post(r#"{"secret":"do-not-echo"}"#)).await;
    assert!(!body.to_string().contains("do-not-echo"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_post_invalid_json_is_bad_request() {
    for payload in ["", "{not json", r#"{"a":1"#] {
        let (status, body) = send(post(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload:?}");
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON body: "));
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = build_router().oneshot(get("/api/other")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
