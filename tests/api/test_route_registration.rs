// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! Verifies every published endpoint is wired into the router with the
//! right method, using stub predictors so no network access happens.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use screwtrue_api::detection::{
    CascadeStage, DetectionCascade, Predictor, PredictorError, PredictorResponse,
};
use screwtrue_api::{create_app, AppConfig, AppState, StagePolicy};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

struct EmptyPredictor;

#[async_trait]
impl Predictor for EmptyPredictor {
    async fn predict(&self, _image_base64: &str) -> Result<PredictorResponse, PredictorError> {
        Ok(PredictorResponse::default())
    }
}

fn test_state() -> AppState {
    let config = AppConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        stage1: StagePolicy::stage1("https://example.com/m1".to_string(), "k".to_string()),
        stage2: StagePolicy::stage2("https://example.com/m2".to_string(), "k".to_string()),
    };
    let cascade = DetectionCascade::new(vec![
        CascadeStage {
            policy: config.stage1.clone(),
            predictor: Arc::new(EmptyPredictor),
        },
        CascadeStage {
            policy: config.stage2.clone(),
            predictor: Arc::new(EmptyPredictor),
        },
    ]);
    AppState::new(Arc::new(config), Arc::new(cascade))
}

#[tokio::test]
async fn test_root_route_registered() {
    let app = create_app(test_state());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_route_registered() {
    let app = create_app(test_state());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_classes_route_registered() {
    let app = create_app(test_state());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/classes")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_detect_base64_rejects_get() {
    let app = create_app(test_state());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/detect/base64")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_app(test_state());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/inference")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_stage_configuration() {
    let app = create_app(test_state());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_configured"], true);
    assert_eq!(body["stages"][0]["model"], 1);
    assert_eq!(body["stages"][0]["confidence_threshold"], 0.65);
    assert_eq!(body["stages"][1]["model"], 2);
    assert_eq!(body["stages"][1]["confidence_threshold"], 0.55);
    assert_eq!(body["classes"].as_array().unwrap().len(), 10);
}
