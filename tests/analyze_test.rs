mod common;

use axum::http::StatusCode;
use common::*;
use httpmock::prelude::*;
use medibot::Config;
use serde_json::json;

const SKIN_URI: &str = "/api/v1/analyze/skin";
const MEDICINE_URI: &str = "/api/v1/analyze/medicine";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00";

fn skin_parts<'a>(symptoms: &'a str) -> Vec<Part<'a>> {
    vec![
        ("symptoms", None, symptoms.as_bytes()),
        ("file", Some("rash.png"), PNG),
    ]
}

#[tokio::test]
async fn skin_analysis_is_reshaped() {
    let server = MockServer::start_async().await;
    let reply = r#"```json
{"condition": "contact dermatitis", "confidence": 0.912, "severity": "mild",
 "description": "An itchy red patch.", "symptomAnalysis": "Likely a reaction to an irritant.",
 "recommendations": ["Avoid the irritant", "Apply a cold compress"],
 "predictions": [{"disease": "atopic dermatitis", "confidence": 0.05}, {"disease": "contact dermatitis", "confidence": 0.912}]}
```"#;
    let gateway = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", format!("Bearer {}", AI_KEY))
            .body_contains("data:image/png;base64,")
            .body_contains("Symptoms: itchy after gardening")
            .body_contains("test-model");
        then.status(200).json_body(completion(reply));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &skin_parts("  itchy after gardening ")),
    ).await;

    gateway.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["condition"], "contact dermatitis");
    assert_eq!(body["confidence"], 91.2);
    assert_eq!(body["severity"], "Low");
    assert_eq!(body["suggestedDoctor"], "Dermatologist");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
    assert_eq!(body["predictions"][0]["disease"], "contact dermatitis");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn missing_file_is_rejected_before_calling_gateway() {
    let server = MockServer::start_async().await;
    let gateway = server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion("{}"));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &[("symptoms", None, "itchy".as_bytes())]),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing image file (field name: file)." }));
    gateway.assert_hits_async(0).await;
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let server = MockServer::start_async().await;
    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &[("symptoms", None, "itchy".as_bytes()), ("file", Some("rash.gif"), PNG)]),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please upload a valid image (jpg/jpeg/png/webp).");
}

#[tokio::test]
async fn blank_symptoms_are_rejected() {
    let server = MockServer::start_async().await;
    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &skin_parts("   ")),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please describe your symptoms for accurate analysis.");
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let server = MockServer::start_async().await;
    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &[("symptoms", None, "itchy".as_bytes()), ("file", Some("rash.jpg"), "".as_bytes())]),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Uploaded image is empty.");
}

#[tokio::test]
async fn renamed_non_image_is_rejected_before_calling_gateway() {
    let server = MockServer::start_async().await;
    let gateway = server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion("{}"));
    }).await;
    let app = app(test_config(&server));

    let (status, body) = send(
        app.clone(),
        multipart_request(SKIN_URI, &[
            ("symptoms", None, "itchy".as_bytes()),
            ("file", Some("notes.png"), "just some text, not a picture".as_bytes()),
        ]),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unable to read image: 'notes.png' is not a valid image/png file.");

    let (status, _) = send(
        app,
        multipart_request(SKIN_URI, &[("symptoms", None, "itchy".as_bytes()), ("file", Some("rash.jpg"), PNG)]),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    gateway.assert_hits_async(0).await;
}

#[tokio::test]
async fn non_multipart_body_is_a_json_bad_request() {
    let server = MockServer::start_async().await;
    let (status, body) = send(
        app(test_config(&server)),
        json_request(SKIN_URI, &json!({ "symptoms": "itchy" })),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn rate_limit_and_payment_errors_pass_through() {
    for (upstream, expected) in [(429, StatusCode::TOO_MANY_REQUESTS), (402, StatusCode::PAYMENT_REQUIRED)] {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(upstream).body("slow down");
        }).await;

        let (status, body) = send(
            app(test_config(&server)),
            multipart_request(SKIN_URI, &skin_parts("itchy")),
        ).await;

        assert_eq!(status, expected);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}

#[tokio::test]
async fn other_gateway_failures_become_bad_gateway() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("internal details");
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &skin_parts("itchy")),
    ).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "AI gateway error");
}

#[tokio::test]
async fn unparseable_reply_becomes_bad_gateway() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion("I'm not able to help with that."));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &skin_parts("itchy")),
    ).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "AI response could not be parsed");
}

#[tokio::test]
async fn refused_image_is_unprocessable() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion(r#"{"error": "The photo shows a cat, not skin."}"#));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(SKIN_URI, &skin_parts("itchy")),
    ).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "The photo shows a cat, not skin.");
}

#[tokio::test]
async fn missing_gateway_key_is_server_error() {
    let server = MockServer::start_async().await;
    let config = Config { ai_gateway_api_key: None, ..test_config(&server) };

    let (status, body) = send(app(config), multipart_request(SKIN_URI, &skin_parts("itchy"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI gateway is not configured");
}

#[tokio::test]
async fn medicine_analysis_is_reshaped() {
    let server = MockServer::start_async().await;
    let reply = r#"{"medicineName": "Tylenol", "genericName": "Acetaminophen",
        "activeIngredients": ["Acetaminophen 500 mg"], "uses": ["Pain", "Fever"],
        "warnings": ["Liver damage with overdose"]}"#;
    let gateway = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("data:image/jpeg;base64,")
            .body_contains("Additional context: from my cabinet");
        then.status(200).json_body(completion(reply));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        multipart_request(MEDICINE_URI, &[
            ("file", Some("box.JPG"), JPEG),
            ("notes", None, "from my cabinet".as_bytes()),
        ]),
    ).await;

    gateway.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medicineName"], "Tylenol");
    assert_eq!(body["manufacturer"], "Not specified");
    assert_eq!(body["dosage"], "Not specified");
    assert_eq!(body["uses"], json!(["Pain", "Fever"]));
    assert_eq!(body["sideEffects"], json!([]));
}

#[tokio::test]
async fn medicine_requires_file() {
    let server = MockServer::start_async().await;
    let (status, _) = send(
        app(test_config(&server)),
        multipart_request(MEDICINE_URI, &[("notes", None, "nothing attached".as_bytes())]),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
