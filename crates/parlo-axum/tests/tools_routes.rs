//! Integration tests for the `/api/tools/*` HTTP endpoints.
//!
//! Only the locally-served and locally-validated parts are exercised here;
//! anything that would reach the remote tool backend is covered by the
//! client tests in `parlo-tools` against a fake HTTP backend.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use parlo_axum::bootstrap::{CorsConfig, ServerConfig, bootstrap};
use parlo_axum::routes::create_router;

fn test_app() -> axum::Router {
    let ctx = bootstrap(&ServerConfig::default()).expect("bootstrap");
    create_router(ctx, &CorsConfig::AllowAll)
}

async fn parse_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"))
}

#[tokio::test]
async fn catalog_lists_all_tools_and_categories() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/tools")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_json(response).await;
    let tools = json["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 12);
    // Coming-soon entries are present but flagged unavailable.
    let music = tools
        .iter()
        .find(|t| t["id"] == "music-generator")
        .expect("music-generator listed");
    assert_eq!(music["available"], false);

    let categories = json["categories"].as_array().expect("categories array");
    assert_eq!(categories[0]["id"], "all");
    assert_eq!(categories[0]["count"], 12);
}

#[tokio::test]
async fn translate_rejects_empty_text_before_contacting_backend() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tools/translate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text": "  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = parse_json(response).await;
    assert_eq!(json["type"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "No text provided");
}

#[tokio::test]
async fn image_generation_rejects_empty_prompt() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tools/image")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
