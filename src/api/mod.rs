//! HTTP API layer: system endpoints and OpenAPI document.

pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the HTTP endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "audio-sink-gateway", description = "WebSocket PCM audio ingest gateway"),
    paths(handlers::system::health_handler, handlers::system::stats_handler),
    components(schemas(
        handlers::system::HealthResponse,
        handlers::system::StatsResponse,
        crate::domain::StatsSnapshot,
    )),
    tags((name = "System", description = "Health and statistics"))
)]
pub struct ApiDoc;

/// Builds the HTTP router: system endpoints plus Swagger UI when the
/// `swagger-ui` feature is enabled.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
