use axum::{
    extract::FromRef,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Value};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::Notice;
use crate::core::notice::NoticeSigner;
use crate::shared::templates::Templates;

/// Request-independent pieces every page handler needs.
///
/// Built once in `main` and cloned into each feature's router state.
#[derive(Clone)]
pub struct WebContext {
    pub templates: Arc<Templates>,
    pub notices: NoticeSigner,
}

impl WebContext {
    pub fn new(templates: Templates, notices: NoticeSigner) -> Self {
        Self {
            templates: Arc::new(templates),
            notices,
        }
    }

    /// Render a page with the pending notice merged into its context
    pub fn render(&self, template: &str, notice: &Notice, ctx: Value) -> Result<Response> {
        let html = self.templates.render(
            template,
            context! {
                notice => notice.message(),
                ..ctx
            },
        )?;

        Ok(notice.finish(Html(html).into_response()))
    }

    /// Redirect with a one-shot notice for the next page
    pub fn redirect_with_notice(&self, to: &str, message: &str) -> Response {
        self.notices.redirect(to, message)
    }
}

impl FromRef<WebContext> for NoticeSigner {
    fn from_ref(web: &WebContext) -> Self {
        web.notices.clone()
    }
}

/// Router state for a feature backed by a service
pub struct PageState<S> {
    pub service: Arc<S>,
    pub web: WebContext,
}

impl<S> PageState<S> {
    pub fn new(service: Arc<S>, web: WebContext) -> Self {
        Self { service, web }
    }
}

// Manual impl: `S` itself does not need to be Clone
impl<S> Clone for PageState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            web: self.web.clone(),
        }
    }
}

impl<S> FromRef<PageState<S>> for NoticeSigner {
    fn from_ref(state: &PageState<S>) -> Self {
        state.web.notices.clone()
    }
}
