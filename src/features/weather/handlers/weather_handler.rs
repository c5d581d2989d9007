use axum::{
    extract::{Form, State},
    response::Response,
};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::Notice;
use crate::core::state::PageState;
use crate::features::weather::dtos::WeatherFormDto;
use crate::features::weather::services::WeatherService;
use crate::shared::constants::NOTICE_ENTER_CITY;

/// Lookup form without a result
pub async fn weather_page(
    State(state): State<PageState<WeatherService>>,
    notice: Notice,
) -> Result<Response> {
    state
        .web
        .render("weather.html", &notice, context! { weather => () })
}

/// Look up the weather for a city
///
/// An empty city re-renders the form with an inline notice in place of any
/// pending one.
pub async fn lookup_weather(
    State(state): State<PageState<WeatherService>>,
    notice: Notice,
    Form(form): Form<WeatherFormDto>,
) -> Result<Response> {
    let weather = state.service.lookup(&form.city);
    let notice = match weather {
        Some(_) => notice,
        None => notice.replace(NOTICE_ENTER_CITY),
    };

    state
        .web
        .render("weather.html", &notice, context! { weather })
}
