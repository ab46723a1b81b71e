use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Multipart form accepted by the skin analysis endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SkinAnalysisUpload {
    /// Photo of the affected skin (jpg, jpeg, png or webp)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Free text description of the symptoms
    pub symptoms: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Moderate => write!(f, "Moderate"),
            Severity::High => write!(f, "High"),
            Severity::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One ranked candidate condition. Confidence is a fraction in 0..=1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Prediction {
    pub disease: String,
    pub confidence: f64,
}

/// Response for a skin photo analysis
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysisResponse {
    pub condition: String,
    /// Percent, one decimal place
    pub confidence: f64,
    pub description: String,
    pub severity: Severity,
    pub suggested_doctor: String,
    pub symptom_analysis: String,
    pub recommendations: Vec<String>,
    pub predictions: Vec<Prediction>,
    pub timestamp: String,
}
