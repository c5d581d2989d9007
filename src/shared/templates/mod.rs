//! Server-rendered HTML pages.

pub mod engine;

pub use engine::{TemplateError, Templates};
