use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::info;

use super::{check_status, require_key, ClientError};
use crate::models::Coordinates;

const SERVICE: &str = "Maps service";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// [longitude, latitude]
    center: Vec<f64>,
    place_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsApiResponse {
    #[serde(default)]
    routes: Vec<Route>,
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Route {
    distance: f64,
    duration: f64,
}

/// A geocoded place
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coordinates: Coordinates,
    pub place_name: String,
}

/// Length of a computed route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Client for a Mapbox style geocoding and directions API
#[derive(Debug, Clone)]
pub struct MapsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MapsClient {
    pub fn new(client: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        require_key(SERVICE, &self.api_key).is_ok()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidResponse {
            service: SERVICE,
            message: format!("invalid base url: {}", e),
        })?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidResponse {
                service: SERVICE,
                message: "base url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve free text to the best matching place, if any
    pub async fn geocode(&self, query: &str) -> Result<Option<Place>, ClientError> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let file = format!("{}.json", query);
        let url = self.endpoint(&["geocoding", "v5", "mapbox.places", &file])?;

        let response = self.client.get(url)
            .query(&[("access_token", api_key), ("limit", "1")])
            .send().await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;
        let response = check_status(SERVICE, response).await?;

        let body: GeocodingResponse = response.json().await
            .map_err(|e| ClientError::InvalidResponse { service: SERVICE, message: e.to_string() })?;

        let place = body.features.into_iter().find_map(|f| match f.center.as_slice() {
            [longitude, latitude, ..] => Some(Place {
                coordinates: Coordinates { latitude: *latitude, longitude: *longitude },
                place_name: f.place_name.unwrap_or_else(|| query.to_string()),
            }),
            _ => None,
        });
        info!("Geocoded '{}': {}", query, if place.is_some() { "found" } else { "no match" });
        Ok(place)
    }

    /// Route between two points for the given travel profile
    pub async fn directions(&self, profile: &str, from: Coordinates, to: Coordinates) -> Result<RouteSummary, ClientError> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let waypoints = format!("{},{};{},{}", from.longitude, from.latitude, to.longitude, to.latitude);
        let url = self.endpoint(&["directions", "v5", "mapbox", profile, &waypoints])?;

        let response = self.client.get(url)
            .query(&[("access_token", api_key), ("overview", "false")])
            .send().await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;
        let response = check_status(SERVICE, response).await?;

        let body: DirectionsApiResponse = response.json().await
            .map_err(|e| ClientError::InvalidResponse { service: SERVICE, message: e.to_string() })?;

        let route = body.routes.first().ok_or_else(|| ClientError::InvalidResponse {
            service: SERVICE,
            message: format!("no route found ({})", body.code.as_deref().unwrap_or("unknown")),
        })?;

        Ok(RouteSummary {
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
