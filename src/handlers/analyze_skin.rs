use axum::{extract::{multipart::MultipartRejection, Multipart, State}, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;

use super::upload::UploadForm;
use crate::{
    models::{multipart_rejection, error_response, ApiError, SkinAnalysisResponse},
    services::skin_analysis::{parse_skin_analysis, system_prompt, user_prompt},
    state::AppState,
};

/// Analyze a photo of a skin condition
pub async fn analyze_skin(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<SkinAnalysisResponse>), ApiError> {

    let mut form = UploadForm::read(multipart.map_err(multipart_rejection)?).await?;
    let image = form.take_image()?;

    let symptoms = match form.field("symptoms") {
        Some(symptoms) => symptoms.to_string(),
        None => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Please describe your symptoms for accurate analysis.",
            ))
        }
    };

    let reply = state.ai.complete(&system_prompt(), &user_prompt(&symptoms), Some(&image)).await?;
    let analysis = parse_skin_analysis(&reply, Utc::now())?;

    info!(
        "Skin analysis complete: {} ({}%, severity {})",
        analysis.condition, analysis.confidence, analysis.severity
    );
    Ok((StatusCode::OK, Json(analysis)))
}
