mod common;

use axum::http::StatusCode;
use common::*;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn geocode_returns_first_feature() {
    let server = MockServer::start_async().await;
    let maps = server.mock_async(|when, then| {
        when.method(GET)
            .path("/geocoding/v5/mapbox.places/Austin.json")
            .query_param("access_token", MAPS_KEY)
            .query_param("limit", "1");
        then.status(200).json_body(json!({
            "features": [{ "center": [-97.7431, 30.2672], "place_name": "Austin, Texas, United States" }]
        }));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        json_request("/api/v1/geo/geocode", &json!({ "query": " Austin " })),
    ).await;

    maps.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "latitude": 30.2672, "longitude": -97.7431, "placeName": "Austin, Texas, United States" }));
}

#[tokio::test]
async fn geocode_without_match_is_not_found() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(GET).path("/geocoding/v5/mapbox.places/Nowhere.json");
        then.status(200).json_body(json!({ "features": [] }));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        json_request("/api/v1/geo/geocode", &json!({ "query": "Nowhere" })),
    ).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Location 'Nowhere' not found");
}

#[tokio::test]
async fn blank_geocode_query_is_rejected() {
    let server = MockServer::start_async().await;
    let (status, body) = send(
        app(test_config(&server)),
        json_request("/api/v1/geo/geocode", &json!({ "query": "  " })),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing query");
}

#[tokio::test]
async fn malformed_bodies_are_json_bad_requests() {
    let server = MockServer::start_async().await;
    let app = app(test_config(&server));

    let (status, body) = send(app.clone(), json_request("/api/v1/geo/geocode", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("query")));

    let (status, body) = send(app, json_request("/api/v1/geo/directions", &json!({
        "from": { "latitude": "north", "longitude": -97.0 },
        "to": { "latitude": 31.0, "longitude": -97.0 }
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn directions_are_summarized() {
    let server = MockServer::start_async().await;
    let maps = server.mock_async(|when, then| {
        when.method(GET)
            .path("/directions/v5/mapbox/walking/-97.74,30.27;-97.75,30.28")
            .query_param("access_token", MAPS_KEY);
        then.status(200).json_body(json!({ "code": "Ok", "routes": [{ "distance": 1850.0, "duration": 1320.0 }] }));
    }).await;

    let (status, body) = send(
        app(test_config(&server)),
        json_request("/api/v1/geo/directions", &json!({
            "from": { "latitude": 30.27, "longitude": -97.74 },
            "to": { "latitude": 30.28, "longitude": -97.75 },
            "profile": "Walking"
        })),
    ).await;

    maps.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distanceText"], "1.9 km");
    assert_eq!(body["durationText"], "22 min");
    assert_eq!(body["profile"], "walking");
}

#[tokio::test]
async fn directions_validate_input() {
    let server = MockServer::start_async().await;
    let app = app(test_config(&server));

    let (status, _) = send(app.clone(), json_request("/api/v1/geo/directions", &json!({
        "from": { "latitude": 30.0, "longitude": -97.0 },
        "to": { "latitude": 31.0, "longitude": -97.0 },
        "profile": "flying"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(app, json_request("/api/v1/geo/directions", &json!({
        "from": { "latitude": 95.0, "longitude": -97.0 },
        "to": { "latitude": 31.0, "longitude": -97.0 }
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Coordinates out of range");
}
