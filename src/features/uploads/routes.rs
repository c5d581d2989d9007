use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::state::{PageState, WebContext};
use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
///
/// The request body ceiling is applied app-wide, not here.
pub fn routes(service: Arc<UploadService>, web: WebContext) -> Router {
    Router::new()
        .route(
            "/upload",
            get(handlers::upload_page).post(handlers::upload_file),
        )
        .route("/uploads/{filename}", get(handlers::download_file))
        .with_state(PageState::new(service, web))
}
