use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use super::ai_output::{as_number, extract_json_object, number_field, refusal, string_field, string_list, AnalysisError};
use crate::models::{Prediction, Severity, SkinAnalysisResponse};

/// Label space offered to the model
pub const CONDITIONS: [&str; 34] = [
    "acne vulgaris",
    "rosacea",
    "hidradenitis suppurativa",
    "folliculitis",
    "seborrheic dermatitis",
    "atopic dermatitis",
    "contact dermatitis",
    "psoriasis vulgaris",
    "inverse psoriasis",
    "scalp psoriasis",
    "pityriasis rosea",
    "lichen planus",
    "urticaria (hives)",
    "impetigo",
    "cellulitis",
    "erysipelas",
    "tinea corporis (ringworm)",
    "tinea versicolor",
    "onychomycosis",
    "molluscum contagiosum",
    "herpes simplex",
    "herpes zoster",
    "scabies",
    "vitiligo",
    "hyperpigmentation",
    "melasma",
    "seborrheic keratosis",
    "actinic keratosis",
    "melanoma",
    "basal cell carcinoma",
    "squamous cell carcinoma",
    "dandruff",
    "alopecia areata",
    "granuloma annulare",
];

pub const MAX_PREDICTIONS: usize = 5;

const DEFAULT_RECOMMENDATION: &str = "Consult a dermatologist for a professional evaluation.";

pub fn system_prompt() -> String {
    format!(
        "You are a medical assistant for dermatology triage. Look at the photo and the reported symptoms \
         and answer with a single JSON object, no markdown.\n\
         Keys: condition, confidence, description, severity, suggestedDoctor, symptomAnalysis, recommendations, predictions.\n\
         - condition: the most likely label from this list: {}\n\
         - confidence: number between 0 and 100\n\
         - severity: one of Low, Moderate, High\n\
         - suggestedDoctor: short string, e.g. \"Dermatologist\"\n\
         - description: one sentence, not a diagnosis\n\
         - symptomAnalysis: 2-4 sentences explaining the top prediction\n\
         - recommendations: array of 3-5 short, safe next steps\n\
         - predictions: array of up to 5 objects {{\"disease\": label, \"confidence\": number between 0 and 1}}\n\
         If the photo does not show skin, answer {{\"error\": \"<short reason>\"}} instead.",
        CONDITIONS.join(", ")
    )
}

pub fn user_prompt(symptoms: &str) -> String {
    format!("Symptoms: {}", symptoms.trim())
}

/// Map free form severity wording onto the fixed scale
pub fn normalize_severity(raw: Option<&str>) -> Severity {
    let Some(raw) = raw else {
        return Severity::Unknown;
    };
    let raw = raw.trim().to_lowercase();
    if raw.contains("high") || raw.contains("severe") || raw.contains("urgent") {
        Severity::High
    } else if raw.contains("moderate") || raw.contains("medium") {
        Severity::Moderate
    } else if raw.contains("low") || raw.contains("mild") || raw.contains("minor") {
        Severity::Low
    } else {
        Severity::Unknown
    }
}

/// Percent in 0..=100 with one decimal. Values at or below 1 are read as fractions.
pub fn normalize_percent(value: f64) -> f64 {
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    (percent.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

fn normalize_fraction(value: f64) -> f64 {
    let fraction = if value > 1.0 { value / 100.0 } else { value };
    fraction.clamp(0.0, 1.0)
}

fn parse_predictions(obj: &Map<String, Value>) -> Vec<Prediction> {
    let mut predictions: Vec<Prediction> = obj.get("predictions")
        .and_then(Value::as_array)
        .map(|items| {
            items.iter()
                .filter_map(Value::as_object)
                .filter_map(|p| {
                    let disease = string_field(p, &["disease", "condition", "name", "label"])?;
                    let confidence = p.get("confidence").and_then(as_number).unwrap_or(0.0);
                    Some(Prediction { disease, confidence: normalize_fraction(confidence) })
                })
                .collect()
        })
        .unwrap_or_default();

    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    predictions.truncate(MAX_PREDICTIONS);
    predictions
}

/// Reshape a model reply into the skin analysis response, defaulting missing fields
pub fn parse_skin_analysis(text: &str, now: DateTime<Utc>) -> Result<SkinAnalysisResponse, AnalysisError> {
    let obj = extract_json_object(text)?;
    if let Some(reason) = refusal(&obj, "condition") {
        return Err(AnalysisError::Refused(reason));
    }

    let mut predictions = parse_predictions(&obj);
    let condition = string_field(&obj, &["condition", "disease"])
        .or_else(|| predictions.first().map(|p| p.disease.clone()))
        .unwrap_or_else(|| "Unknown condition".to_string());

    let confidence = number_field(&obj, &["confidence"])
        .or_else(|| predictions.first().map(|p| p.confidence))
        .map(normalize_percent)
        .unwrap_or(0.0);

    if predictions.is_empty() && condition != "Unknown condition" {
        predictions.push(Prediction { disease: condition.clone(), confidence: confidence / 100.0 });
    }

    let mut recommendations = string_list(&obj, &["recommendations"]);
    if recommendations.is_empty() {
        warn!("AI reply for '{}' carried no recommendations, using default", condition);
        recommendations.push(DEFAULT_RECOMMENDATION.to_string());
    }

    Ok(SkinAnalysisResponse {
        condition,
        confidence,
        description: string_field(&obj, &["description"])
            .unwrap_or_else(|| "No description available.".to_string()),
        severity: normalize_severity(string_field(&obj, &["severity"]).as_deref()),
        suggested_doctor: string_field(&obj, &["suggestedDoctor", "suggested_doctor"])
            .unwrap_or_else(|| "Dermatologist".to_string()),
        symptom_analysis: string_field(&obj, &["symptomAnalysis", "symptom_analysis"])
            .unwrap_or_else(|| "No symptom analysis available.".to_string()),
        recommendations,
        predictions,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
