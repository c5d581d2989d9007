use axum::{routing::get, Router};

use crate::core::state::WebContext;
use crate::features::selection::handlers;

/// Create routes for the selection feature
pub fn routes(web: WebContext) -> Router {
    Router::new()
        .route("/selection", get(handlers::selection_page))
        .with_state(web)
}
