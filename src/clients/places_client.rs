use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{check_status, require_key, ClientError};

const SERVICE: &str = "Places service";

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    local_results: Vec<PlaceResult>,
    error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceResult {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub website: Option<String>,
    pub gps_coordinates: Option<GpsCoordinates>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Client for a Google Maps scraping API
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PlacesClient {
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

    /// Search map listings for a free text query
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, ClientError> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let url = format!("{}/search.json", self.base_url);

        let response = self.client.get(&url)
            .query(&[
                ("engine", "google_maps"),
                ("type", "search"),
                ("q", query),
                ("api_key", api_key),
            ])
            .send().await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;
        let response = check_status(SERVICE, response).await?;

        let body: PlacesResponse = response.json().await
            .map_err(|e| ClientError::InvalidResponse { service: SERVICE, message: e.to_string() })?;

        // "no results" is reported through the error field; treat it as empty
        if let Some(error) = body.error {
            if !error.to_lowercase().contains("hasn't returned any results") {
                return Err(ClientError::InvalidResponse { service: SERVICE, message: error });
            }
        }

        info!("Places search '{}' returned {} results", query, body.local_results.len());
        Ok(body.local_results)
    }
}
