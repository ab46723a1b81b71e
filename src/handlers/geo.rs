use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use tracing::{error, info};

use crate::{
    models::{error_response, json_rejection, ApiError, DirectionsRequest, DirectionsResponse, GeocodeRequest, GeocodeResponse},
    state::AppState,
};

const PROFILES: [&str; 3] = ["driving", "walking", "cycling"];

/// Resolve an address or place name to coordinates
pub async fn geocode(
    State(state): State<AppState>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GeocodeResponse>), ApiError> {

    let Json(request) = payload.map_err(json_rejection)?;
    let query = request.query.trim();
    if query.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Missing query"));
    }

    match state.maps.geocode(query).await? {
        Some(place) => Ok((
            StatusCode::OK,
            Json(GeocodeResponse {
                latitude: place.coordinates.latitude,
                longitude: place.coordinates.longitude,
                place_name: place.place_name,
            }),
        )),
        None => {
            error!("No geocoding result for '{}'", query);
            Err(error_response(StatusCode::NOT_FOUND, format!("Location '{}' not found", query)))
        }
    }
}

/// Route distance and travel time between two points
pub async fn directions(
    State(state): State<AppState>,
    payload: Result<Json<DirectionsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DirectionsResponse>), ApiError> {

    let Json(request) = payload.map_err(json_rejection)?;
    let profile = request.profile
        .as_deref()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "driving".to_string());
    if !PROFILES.contains(&profile.as_str()) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid profile '{}'. Use 'driving', 'walking', or 'cycling'.", profile),
        ));
    }
    if !request.from.is_valid() || !request.to.is_valid() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Coordinates out of range"));
    }

    let route = state.maps.directions(&profile, request.from, request.to).await?;
    info!("Route ({}) is {:.0} m / {:.0} s", profile, route.distance_meters, route.duration_seconds);

    Ok((
        StatusCode::OK,
        Json(DirectionsResponse {
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
            distance_text: format_distance(route.distance_meters),
            duration_text: format_duration(route.duration_seconds),
            profile,
        }),
    ))
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as u64;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} min", m.max(1)),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}
