use axum::{
    extract::{Query, State},
    response::Response,
};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::Notice;
use crate::core::state::WebContext;
use crate::features::selection::dtos::SelectionQuery;
use crate::shared::constants::SELECTION_OPTIONS;

pub async fn selection_page(
    State(web): State<WebContext>,
    notice: Notice,
    Query(query): Query<SelectionQuery>,
) -> Result<Response> {
    web.render(
        "selection.html",
        &notice,
        context! {
            options => SELECTION_OPTIONS,
            selected => query.selected,
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::spawn_app;

    #[tokio::test]
    async fn test_selection_lists_options() {
        let app = spawn_app().await;

        let page = app.server.get("/selection").await;

        page.assert_status_ok();
        let html = page.text();
        for option in ["Option 1", "Option 2", "Option 3"] {
            assert!(html.contains(&format!(r#"<option value="{}">"#, option)));
        }
        assert!(!html.contains("You selected"));
    }

    #[tokio::test]
    async fn test_selection_echoes_selected() {
        let app = spawn_app().await;

        let page = app
            .server
            .get("/selection")
            .add_query_param("selected", "Option 2")
            .await;

        let html = page.text();
        assert!(html.contains(r#"<option value="Option 2" selected>"#));
        assert!(html.contains("You selected: Option 2"));
    }

    #[tokio::test]
    async fn test_selection_does_not_validate_selected() {
        let app = spawn_app().await;

        let html = app
            .server
            .get("/selection")
            .add_query_param("selected", "Option 9")
            .await
            .text();

        assert!(html.contains("You selected: Option 9"));
    }
}
