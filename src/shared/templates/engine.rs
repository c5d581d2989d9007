//! Page rendering using Jinja2 syntax.
//!
//! Page templates live in `templates/pages/` and are compiled into the binary,
//! so the server does not depend on its working directory at runtime.

use minijinja::{Environment, Value};
use thiserror::Error;

/// Embedded page templates, keyed by template name
const PAGES: &[(&str, &str)] = &[
    (
        "base.html",
        include_str!("../../../templates/pages/base.html"),
    ),
    (
        "index.html",
        include_str!("../../../templates/pages/index.html"),
    ),
    (
        "weather.html",
        include_str!("../../../templates/pages/weather.html"),
    ),
    (
        "upload.html",
        include_str!("../../../templates/pages/upload.html"),
    ),
    (
        "selection.html",
        include_str!("../../../templates/pages/selection.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to load template '{0}': {1}")]
    LoadError(String, String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Compiled page templates.
///
/// Auto-escaping is on for every `.html` template.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for (name, source) in PAGES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::LoadError(name.to_string(), e.to_string()))?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    /// Render a template with the given context.
    ///
    /// # Example
    /// ```ignore
    /// let html = templates.render("selection.html", context! { options, selected })?;
    /// ```
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Check if a template exists
    #[cfg(test)]
    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}
