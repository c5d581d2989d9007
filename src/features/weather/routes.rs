use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::state::{PageState, WebContext};
use crate::features::weather::handlers;
use crate::features::weather::services::WeatherService;

/// Create routes for the weather feature
pub fn routes(service: Arc<WeatherService>, web: WebContext) -> Router {
    Router::new()
        .route(
            "/weather",
            get(handlers::weather_page).post(handlers::lookup_weather),
        )
        .with_state(PageState::new(service, web))
}
