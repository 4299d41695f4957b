#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use promptlib::config::{extract_config, ConfigV1};
use promptlib::routes::create_router;
use promptlib::state::AppState;
use serde_json::Value;

pub const ACCESS_KEY: &str = "test-secret";

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
environment: production
logging:
  level: "debug"
  format: "json"
admin:
  password: test-secret
"#;

pub const SEED_IDS: [&str; 4] = [
    "creative-hook-generator",
    "logic-python-audit",
    "system-qa-template",
    "code-review-assistant",
];

pub fn load_config(yaml: &str) -> ConfigV1 {
    extract_config(Figment::new().merge(Yaml::string(yaml)))
        .expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    create_router(AppState::from_config(Arc::new(config)))
}

pub fn test_app() -> Router {
    build_app(load_config(TEST_CONFIG))
}

pub fn json_request(method: Method, path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn raw_request(method: Method, path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = serde_json::from_slice(&bytes).expect("body is not JSON");
    (status, value)
}

pub fn ids(prompts: &Value) -> Vec<String> {
    prompts
        .as_array()
        .expect("prompts is an array")
        .iter()
        .map(|p| p["id"].as_str().expect("id is a string").to_string())
        .collect()
}

pub fn orders(prompts: &Value) -> Vec<i64> {
    prompts
        .as_array()
        .expect("prompts is an array")
        .iter()
        .map(|p| p["sortOrder"].as_i64().expect("sortOrder is an integer"))
        .collect()
}
