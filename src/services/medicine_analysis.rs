use chrono::{DateTime, SecondsFormat, Utc};

use super::ai_output::{extract_json_object, refusal, string_field, string_list, AnalysisError};
use crate::models::MedicineAnalysisResponse;

const NOT_SPECIFIED: &str = "Not specified";

pub fn system_prompt() -> &'static str {
    "You are a pharmacy assistant. Read the medicine package or label in the photo and answer with a \
     single JSON object, no markdown.\n\
     Keys: medicineName, genericName, manufacturer, activeIngredients, uses, dosage, sideEffects, warnings, description.\n\
     - activeIngredients, uses, sideEffects, warnings: arrays of short strings\n\
     - dosage: typical adult dosage as printed on the package, or general guidance\n\
     - description: 1-2 sentences in plain language\n\
     Only report what can be read or reliably inferred. \
     If the photo does not show a medicine, answer {\"error\": \"<short reason>\"} instead."
}

pub fn user_prompt(notes: Option<&str>) -> String {
    match notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(notes) => format!("Identify this medicine. Additional context: {}", notes),
        None => "Identify this medicine.".to_string(),
    }
}

/// Reshape a model reply into the medicine response, defaulting missing fields
pub fn parse_medicine_analysis(text: &str, now: DateTime<Utc>) -> Result<MedicineAnalysisResponse, AnalysisError> {
    let obj = extract_json_object(text)?;
    if let Some(reason) = refusal(&obj, "medicineName") {
        return Err(AnalysisError::Refused(reason));
    }

    let or_default = |keys: &[&str]| string_field(&obj, keys).unwrap_or_else(|| NOT_SPECIFIED.to_string());

    Ok(MedicineAnalysisResponse {
        medicine_name: string_field(&obj, &["medicineName", "name"])
            .unwrap_or_else(|| "Unknown medicine".to_string()),
        generic_name: or_default(&["genericName", "generic_name"]),
        manufacturer: or_default(&["manufacturer"]),
        active_ingredients: string_list(&obj, &["activeIngredients", "active_ingredients"]),
        uses: string_list(&obj, &["uses"]),
        dosage: or_default(&["dosage"]),
        side_effects: string_list(&obj, &["sideEffects", "side_effects"]),
        warnings: string_list(&obj, &["warnings"]),
        description: string_field(&obj, &["description"])
            .unwrap_or_else(|| "No description available.".to_string()),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
