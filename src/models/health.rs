use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API response for health and readiness checks
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Which upstream integrations have credentials configured
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    #[serde(rename = "aiGateway")]
    pub ai_gateway: bool,
    pub email: bool,
    pub places: bool,
    pub maps: bool,
}
