use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::state::{PageState, WebContext};
use crate::features::feedback::handlers;
use crate::features::feedback::services::FeedbackService;

/// Create routes for the feedback feature
pub fn routes(service: Arc<FeedbackService>, web: WebContext) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::feedback_page).post(handlers::submit_feedback),
        )
        .with_state(PageState::new(service, web))
}
