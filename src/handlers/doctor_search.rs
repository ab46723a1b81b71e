use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use tracing::{error, info};

use crate::{
    models::{error_response, json_rejection, ApiError, DoctorSearchRequest, DoctorSearchResponse, DoctorSource},
    services::doctor_search::{doctor_from_place, doctor_from_registry, plan_search, SearchPlan},
    state::AppState,
};

/// Search for dermatologists near a location
pub async fn search_doctors(
    State(state): State<AppState>,
    payload: Result<Json<DoctorSearchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DoctorSearchResponse>), ApiError> {

    let Json(request) = payload.map_err(json_rejection)?;
    let plan = plan_search(&request).map_err(|message| {
        error!("Rejected doctor search: {}", message);
        error_response(StatusCode::BAD_REQUEST, message)
    })?;

    let (doctors, source) = match plan {
        SearchPlan::Registry(query) => {
            let records = state.registry.search(&query).await?;
            (records.iter().map(doctor_from_registry).collect::<Vec<_>>(), DoctorSource::Registry)
        }
        SearchPlan::Places { query, limit } => {
            let places = state.places.search(&query).await?;
            let doctors = places.iter()
                .take(limit as usize)
                .map(doctor_from_place)
                .collect::<Vec<_>>();
            (doctors, DoctorSource::Places)
        }
    };

    info!("Doctor search via {:?} returned {} doctors", source, doctors.len());
    Ok((
        StatusCode::OK,
        Json(DoctorSearchResponse { count: doctors.len(), doctors, source }),
    ))
}
