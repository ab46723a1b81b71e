use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form accepted by the medicine analysis endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct MedicineAnalysisUpload {
    /// Photo of the medicine package or label
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Optional extra context from the user
    pub notes: Option<String>,
}

/// Response for a medicine package analysis
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineAnalysisResponse {
    pub medicine_name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub active_ingredients: Vec<String>,
    pub uses: Vec<String>,
    pub dosage: String,
    pub side_effects: Vec<String>,
    pub warnings: Vec<String>,
    pub description: String,
    pub timestamp: String,
}
