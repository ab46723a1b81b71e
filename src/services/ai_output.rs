use axum::http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::{error_response, ApiError};

/// Why a model reply could not become a response
#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("AI response could not be parsed: {0}")]
    Unparseable(String),

    #[error("{0}")]
    Refused(String),
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Unparseable(detail) => {
                error!("AI response could not be parsed: {}", detail);
                error_response(StatusCode::BAD_GATEWAY, "AI response could not be parsed")
            }
            AnalysisError::Refused(reason) => {
                warn!("AI declined the image: {}", reason);
                error_response(StatusCode::UNPROCESSABLE_ENTITY, reason)
            }
        }
    }
}

/// Pull the JSON object out of a model reply that may be wrapped in prose or code fences
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, AnalysisError> {
    let Some(start) = text.find('{') else {
        return Err(AnalysisError::Unparseable("no JSON object found".to_string()));
    };

    // Read exactly one value so prose after the object is ignored
    let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
    match values.next() {
        Some(Ok(Value::Object(map))) => Ok(map),
        Some(Ok(_)) => Err(AnalysisError::Unparseable("expected a JSON object".to_string())),
        Some(Err(e)) => Err(AnalysisError::Unparseable(e.to_string())),
        None => Err(AnalysisError::Unparseable("no JSON object found".to_string())),
    }
}

/// A model that declines to analyze answers with `{"error": "..."}`
pub fn refusal(obj: &Map<String, Value>, expected_key: &str) -> Option<String> {
    if obj.contains_key(expected_key) {
        return None;
    }
    obj.get("error").and_then(Value::as_str).map(str::trim).filter(|e| !e.is_empty()).map(str::to_string)
}

/// First non-blank string under any of the keys
pub fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric field, accepting numbers, numeric strings and "87%"
pub fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(as_number)
}

pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// String list under any of the keys. A single string is split on newlines and bullets.
pub fn string_list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let Some(value) = keys.iter().find_map(|k| obj.get(*k)) else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => items.iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => s.lines()
            .map(|l| l.trim().trim_start_matches(['-', '*', '•']).trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
