use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DoctorSource {
    /// Public provider registry
    #[default]
    Registry,
    /// Places scraping API
    Places,
}

/// Request body for a dermatologist search
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DoctorSearchRequest {
    /// Free text location, e.g. "Austin, TX"
    pub location: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub source: DoctorSource,
}

/// A single doctor record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Doctor {
    pub name: String,
    pub specialty: String,
    pub address: String,
    pub phone: String,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub npi: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source: DoctorSource,
}

/// Response for a dermatologist search
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorSearchResponse {
    pub doctors: Vec<Doctor>,
    pub count: usize,
    pub source: DoctorSource,
}
