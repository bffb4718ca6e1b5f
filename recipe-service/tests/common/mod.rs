//! Shared helpers for recipe-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use recipe_service::config::RecipeConfig;
use recipe_service::services::providers::mock::{MockOutcome, MockTextProvider};
use recipe_service::startup::{build_router, AppState};
use service_core::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// Config for the mock provider, bound to a random local port.
pub fn test_config(extra: &[(&str, &str)]) -> RecipeConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("GENAI_PROVIDER".into(), "mock".into());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    let common = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    RecipeConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("test config should load")
}

pub fn router_with(outcome: MockOutcome) -> (Router, Arc<MockTextProvider>) {
    let provider = Arc::new(MockTextProvider::new(outcome));
    let state = AppState::new(test_config(&[]), provider.clone());
    (build_router(state), provider)
}

/// POST a raw body to `/generate` and decode the JSON reply.
pub async fn post_generate(router: &Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).expect("response should be JSON");
    (status, json)
}
