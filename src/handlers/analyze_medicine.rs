use axum::{extract::{multipart::MultipartRejection, Multipart, State}, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;

use super::upload::UploadForm;
use crate::{
    models::{multipart_rejection, ApiError, MedicineAnalysisResponse},
    services::medicine_analysis::{parse_medicine_analysis, system_prompt, user_prompt},
    state::AppState,
};

/// Identify a medicine from a photo of its package
pub async fn analyze_medicine(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MedicineAnalysisResponse>), ApiError> {

    let mut form = UploadForm::read(multipart.map_err(multipart_rejection)?).await?;
    let image = form.take_image()?;

    let reply = state.ai.complete(system_prompt(), &user_prompt(form.field("notes")), Some(&image)).await?;
    let analysis = parse_medicine_analysis(&reply, Utc::now())?;

    info!("Medicine analysis complete: {}", analysis.medicine_name);
    Ok((StatusCode::OK, Json(analysis)))
}
