use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::middleware;
use crate::core::state::WebContext;
use crate::features::feedback::{routes as feedback_routes, FeedbackService};
use crate::features::selection::routes as selection_routes;
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::features::weather::{routes as weather_routes, WeatherService};

/// Everything the router needs, built once at startup
pub struct AppContext {
    pub web: WebContext,
    pub feedback_service: Arc<FeedbackService>,
    pub weather_service: Arc<WeatherService>,
    pub upload_service: Arc<UploadService>,
    pub max_request_body_size: usize,
}

/// Simple health check endpoint
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .merge(feedback_routes::routes(ctx.feedback_service, ctx.web.clone()))
        .merge(weather_routes::routes(ctx.weather_service, ctx.web.clone()))
        .merge(uploads_routes::routes(ctx.upload_service, ctx.web.clone()))
        .merge(selection_routes::routes(ctx.web))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(ctx.max_request_body_size))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::spawn_app;

    #[tokio::test]
    async fn test_health_check() {
        let app = spawn_app().await;

        let response = app.server.get("/health").await;

        response.assert_status_ok();
        assert!(response.header("x-request-id").to_str().is_ok());
    }
}
