use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Configured integrations", body = ReadyResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Analyze a photo of a skin condition
#[utoipa::path(
    post,
    path = "/api/v1/analyze/skin",
    request_body(content = SkinAnalysisUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis result", body = SkinAnalysisResponse),
        (status = 400, description = "Missing or invalid input", body = ErrorResponse),
        (status = 402, description = "AI credits exhausted", body = ErrorResponse),
        (status = 422, description = "Image could not be analyzed", body = ErrorResponse),
        (status = 429, description = "Rate limited", body = ErrorResponse),
        (status = 502, description = "AI gateway failure", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn analyze_skin_doc() {}

/// Identify a medicine from a package photo
#[utoipa::path(
    post,
    path = "/api/v1/analyze/medicine",
    request_body(content = MedicineAnalysisUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Medicine details", body = MedicineAnalysisResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 402, description = "AI credits exhausted", body = ErrorResponse),
        (status = 422, description = "Image could not be analyzed", body = ErrorResponse),
        (status = 429, description = "Rate limited", body = ErrorResponse),
        (status = 502, description = "AI gateway failure", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn analyze_medicine_doc() {}

/// Search for dermatologists
#[utoipa::path(
    post,
    path = "/api/v1/doctors/search",
    request_body = DoctorSearchRequest,
    responses(
        (status = 200, description = "Matching doctors", body = DoctorSearchResponse),
        (status = 400, description = "No usable location", body = ErrorResponse),
        (status = 502, description = "Search provider failure", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn search_doctors_doc() {}

/// Geocode an address
#[utoipa::path(
    post,
    path = "/api/v1/geo/geocode",
    request_body = GeocodeRequest,
    responses(
        (status = 200, description = "Coordinates", body = GeocodeResponse),
        (status = 400, description = "Missing query", body = ErrorResponse),
        (status = 404, description = "Location not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn geocode_doc() {}

/// Route between two points
#[utoipa::path(
    post,
    path = "/api/v1/geo/directions",
    request_body = DirectionsRequest,
    responses(
        (status = 200, description = "Route summary", body = DirectionsResponse),
        (status = 400, description = "Invalid profile or coordinates", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn directions_doc() {}

/// Report an issue to support
#[utoipa::path(
    post,
    path = "/api/v1/support/report",
    request_body = ReportIssueRequest,
    responses(
        (status = 200, description = "Ticket submitted", body = ReportIssueResponse),
        (status = 400, description = "Missing message or invalid email", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn report_issue_doc() {}

/// One turn of the support chat widget
#[utoipa::path(
    post,
    path = "/api/v1/support/chat",
    request_body = SupportChatRequest,
    responses(
        (status = 200, description = "Next widget state and reply", body = SupportChatResponse)
    )
)]
#[allow(dead_code)]
pub async fn support_chat_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        analyze_skin_doc,
        analyze_medicine_doc,
        search_doctors_doc,
        geocode_doc,
        directions_doc,
        report_issue_doc,
        support_chat_doc,
    ),
    components(
        schemas(
            HealthResponse, ReadyResponse, ErrorResponse,
            SkinAnalysisUpload, SkinAnalysisResponse, Prediction, Severity,
            MedicineAnalysisUpload, MedicineAnalysisResponse,
            DoctorSearchRequest, DoctorSearchResponse, Doctor, DoctorSource,
            Coordinates, GeocodeRequest, GeocodeResponse, DirectionsRequest, DirectionsResponse,
            ReportIssueRequest, ReportIssueResponse, TranscriptEntry,
            SupportChatRequest, SupportChatResponse,
        )
    ),
    tags(
        (name = "api", description = "MediBot API endpoints")
    )
)]
pub struct ApiDoc;
