use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Request body for geocoding an address
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeocodeRequest {
    pub query: String,
}

/// Response for geocoding an address
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeocodeResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "placeName")]
    pub place_name: String,
}

/// Request body for a route between two points
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DirectionsRequest {
    pub from: Coordinates,
    pub to: Coordinates,
    /// driving, walking or cycling
    pub profile: Option<String>,
}

/// Response for a route between two points
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsResponse {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_text: String,
    pub duration_text: String,
    pub profile: String,
}
