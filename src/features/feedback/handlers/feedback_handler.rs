use axum::{extract::State, response::Response};
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{FormFields, Notice};
use crate::core::state::PageState;
use crate::features::feedback::dtos::FeedbackFormDto;
use crate::features::feedback::services::FeedbackService;
use crate::shared::constants::{NOTICE_FEEDBACK_SAVED, NOTICE_FILL_ALL_FIELDS};

/// Feedback form with every message submitted so far
pub async fn feedback_page(
    State(state): State<PageState<FeedbackService>>,
    notice: Notice,
) -> Result<Response> {
    let feedbacks = state.service.list().await?;

    state
        .web
        .render("index.html", &notice, context! { feedbacks })
}

/// Submit feedback
///
/// Accepts urlencoded or multipart form bodies. Always redirects back to `/`
/// so a refresh does not resubmit the form.
pub async fn submit_feedback(
    State(state): State<PageState<FeedbackService>>,
    FormFields(form): FormFields<FeedbackFormDto>,
) -> Result<Response> {
    match state.service.submit(form).await {
        Ok(_) => Ok(state.web.redirect_with_notice("/", NOTICE_FEEDBACK_SAVED)),
        Err(AppError::Validation(reason)) => {
            tracing::debug!("Feedback rejected: {}", reason);
            Ok(state.web.redirect_with_notice("/", NOTICE_FILL_ALL_FIELDS))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{spawn_app, spawn_app_with_unavailable_store};
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::en::Name;
    use fake::Fake;

    #[tokio::test]
    async fn test_submit_valid_feedback() {
        let app = spawn_app().await;

        for _ in 0..3 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let message: String = Sentence(3..8).fake();
            let before = app.feedback.all().len();

            let response = app
                .server
                .post("/")
                .form(&[
                    ("name", format!("  {} ", name)),
                    ("email", email.clone()),
                    ("message", format!("{}\n", message)),
                ])
                .await;

            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(response.header("location"), "/");

            let all = app.feedback.all();
            assert_eq!(all.len(), before + 1);
            let last = all.last().unwrap();
            assert_eq!(last.name, clean(&name));
            assert_eq!(last.email, clean(&email));
            assert_eq!(last.message, clean(&message));
        }
    }

    fn clean(value: &str) -> String {
        crate::shared::validation::clean_text(value)
    }

    #[tokio::test]
    async fn test_submit_multipart_feedback() {
        let app = spawn_app().await;

        let response = app
            .server
            .post("/")
            .multipart(
                MultipartForm::new()
                    .add_text("name", "Ann")
                    .add_text("email", "ann@example.com")
                    .add_text("message", "sent as multipart")
                    .add_part(
                        "attachment",
                        Part::bytes(b"ignored".as_slice()).file_name("note.txt".to_string()),
                    ),
            )
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let all = app.feedback.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ann");
        assert_eq!(all[0].message, "sent as multipart");
    }

    #[tokio::test]
    async fn test_submit_multipart_with_missing_field_is_not_saved() {
        let app = spawn_app().await;

        let response = app
            .server
            .post("/")
            .multipart(MultipartForm::new().add_text("name", "Ann"))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert!(app.feedback.all().is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_empty_field_is_not_saved() {
        let app = spawn_app().await;

        for (name, email, message) in [
            ("", "a@example.com", "hi"),
            ("Ann", "   ", "hi"),
            ("Ann", "a@example.com", "\n\t"),
        ] {
            let response = app
                .server
                .post("/")
                .form(&[("name", name), ("email", email), ("message", message)])
                .await;

            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(response.header("location"), "/");
        }

        assert!(app.feedback.all().is_empty());
    }

    #[tokio::test]
    async fn test_notice_shown_once_after_redirect() {
        let app = spawn_app().await;

        let response = app
            .server
            .post("/")
            .form(&[("name", "Ann")])
            .await;
        let notice = response.cookie("notice");

        let page = app.server.get("/").add_cookie(notice).await;
        page.assert_status_ok();
        assert!(page.text().contains(NOTICE_FILL_ALL_FIELDS));
        let cleared = page.header("set-cookie");
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));

        let again = app.server.get("/").await;
        assert!(!again.text().contains(NOTICE_FILL_ALL_FIELDS));
    }

    #[tokio::test]
    async fn test_forged_notice_is_ignored() {
        let app = spawn_app().await;

        let page = app
            .server
            .get("/")
            .add_header(
                header::COOKIE,
                HeaderValue::from_static("notice=aGFja2Vk.00"),
            )
            .await;

        page.assert_status_ok();
        assert!(!page.text().contains("hacked"));
    }

    #[tokio::test]
    async fn test_feedback_page_lists_entries_without_double_escaping() {
        let app = spawn_app().await;

        app.server
            .post("/")
            .form(&[
                ("name", "Ann"),
                ("email", "ann@example.com"),
                ("message", "<b>bold</b> & more"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let html = app.server.get("/").await.text();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(!html.contains("&amp;lt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let server = spawn_app_with_unavailable_store().await;

        server
            .post("/")
            .form(&[
                ("name", "Ann"),
                ("email", "ann@example.com"),
                ("message", "hi"),
            ])
            .expect_failure()
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        server
            .get("/")
            .expect_failure()
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
