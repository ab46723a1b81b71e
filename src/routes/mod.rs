pub mod api;
pub mod cors;

pub use api::create_api_routes;
pub use cors::{cors_layer, wildcard_without_origin};

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs::ApiDoc, state::AppState};

/// Full application: API under /api, Swagger UI, CORS and request tracing
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let mirror_origin = state.config.cors_origin_list().is_empty();

    let mut app = Router::new()
        // Mount API routes
        .nest("/api", create_api_routes(state))
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);
    if mirror_origin {
        app = app.layer(middleware::from_fn(wildcard_without_origin));
    }

    // Add tracing layer
    app.layer(TraceLayer::new_for_http())
}
