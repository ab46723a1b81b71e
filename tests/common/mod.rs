#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use httpmock::MockServer;
use medibot::{create_app, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "medibot-test-boundary";
pub const AI_KEY: &str = "ai-test-key";
pub const EMAIL_KEY: &str = "email-test-key";
pub const PLACES_KEY: &str = "places-test-key";
pub const MAPS_KEY: &str = "maps-test-key";

/// Configuration with every upstream pointed at the mock server
pub fn test_config(server: &MockServer) -> Config {
    Config {
        ai_gateway_url: server.base_url(),
        ai_gateway_api_key: Some(AI_KEY.to_string()),
        ai_model: "test-model".to_string(),
        email_api_url: server.base_url(),
        email_api_key: Some(EMAIL_KEY.to_string()),
        email_from: "bot@medibot.test".to_string(),
        support_email_to: "support@medibot.test".to_string(),
        npi_registry_url: server.url("/api"),
        places_api_url: server.base_url(),
        places_api_key: Some(PLACES_KEY.to_string()),
        maps_api_url: server.base_url(),
        maps_api_key: Some(MAPS_KEY.to_string()),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn app(config: Config) -> Router {
    create_app(AppState::new(config).expect("http client builds"))
}

/// One part of a multipart body: (field name, filename, content)
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
            }
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request through the app and decode the JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

/// Chat completion body wrapping the given assistant text
pub fn completion(content: &str) -> Value {
    serde_json::json!({
        "id": "cmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}
