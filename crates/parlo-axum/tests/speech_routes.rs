//! Integration tests for the `/api/speech/*` HTTP endpoints.
//!
//! These tests drive the real bootstrap (simulated engine, in-process
//! speech service) through the router with `tower::ServiceExt::oneshot`,
//! verifying:
//!  - Every speech route is wired correctly (no 404/405).
//!  - The JSON shapes match the documented camelCase contract.
//!  - Error mapping: empty text → 400, empty catalog → 409.
//!  - The speak → state → stop round trip, including generation advance.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use parlo_axum::bootstrap::{CorsConfig, ServerConfig, bootstrap};
use parlo_axum::routes::create_router;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let ctx = bootstrap(&config).expect("bootstrap");
    create_router(ctx, &CorsConfig::AllowAll)
}

/// Build a router and wait until the simulated engine's lazy voice
/// inventory (200ms) has loaded, confirmed by an explicit refresh.
async fn ready_app() -> axum::Router {
    let app = test_app();
    tokio::time::sleep(Duration::from_millis(400)).await;
    let response = app
        .clone()
        .oneshot(post_json("/api/speech/voices/refresh", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    app
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn parse_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"))
}

// ── Route wiring ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_route_reports_name_and_version() {
    let app = test_app();
    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_json(response).await;
    assert_eq!(json["name"], "parlo");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_api_route_returns_404() {
    let app = test_app();
    let response = app.oneshot(get("/api/speech/nonsense")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ── State and status ─────────────────────────────────────────────────────────

#[tokio::test]
async fn state_starts_idle_at_generation_zero() {
    let app = test_app();
    let response = app.oneshot(get("/api/speech/state")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_json(response).await;
    assert_eq!(json["state"], "idle");
    assert_eq!(json["generation"], 0);
    assert!(json["utterance"].is_null());
}

#[tokio::test]
async fn status_is_wrapped_and_nullable() {
    let app = test_app();
    let response = app.oneshot(get("/api/speech/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_json(response).await;
    // The channel may or may not have published by now; the key must exist.
    assert!(json.get("status").is_some());
}

// ── Voices ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_returns_builtin_voices_once_ready() {
    let app = ready_app().await;
    let response = app.oneshot(get("/api/speech/voices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_json(response).await;
    let voices = json["voices"].as_array().expect("voices array");
    assert_eq!(voices.len(), 4);
    assert_eq!(json["defaultVoice"], "Samantha");
    assert_eq!(voices[0]["lang"], "en-US");
    assert_eq!(voices[0]["isDefault"], true);
}

// ── Speak validation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn speak_before_voices_load_returns_conflict() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/api/speech/speak", r#"{"text": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = parse_json(response).await;
    assert_eq!(json["type"], "NO_VOICES_AVAILABLE");
    assert_eq!(json["status"], 409);
}

#[tokio::test]
async fn speak_with_empty_text_is_rejected() {
    let app = ready_app().await;
    let response = app
        .oneshot(post_json("/api/speech/speak", r#"{"text": "   "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = parse_json(response).await;
    assert_eq!(json["type"], "VALIDATION_ERROR");
}

// ── Round trip ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn speak_then_stop_round_trip() {
    let app = ready_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/speech/speak",
            r#"{"text": "a sentence long enough to still be playing", "rate": 1.0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_json(response).await;
    let generation = json["generation"].as_u64().expect("generation");
    assert!(generation >= 1);

    // The engine confirms the start after its startup latency (40ms).
    tokio::time::sleep(Duration::from_millis(200)).await;
    let response = app.clone().oneshot(get("/api/speech/state")).await.unwrap();
    let json = parse_json(response).await;
    assert_eq!(json["state"], "speaking");
    assert_eq!(json["generation"], generation);
    assert!(json["utterance"]["text"].is_string());

    // Stop returns the post-stop snapshot with the generation advanced.
    let response = app
        .clone()
        .oneshot(post_json("/api/speech/stop", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = parse_json(response).await;
    assert_eq!(json["state"], "idle");
    assert!(json["generation"].as_u64().unwrap() > generation);
    assert!(json["utterance"].is_null());
}

#[tokio::test]
async fn pause_without_playback_is_a_no_op() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/api/speech/pause", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = parse_json(response).await;
    assert_eq!(json["requested"], false);
}
