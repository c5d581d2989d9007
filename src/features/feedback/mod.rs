//! Feedback form and public message list.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Feedback form and all submitted messages |
//! | POST | `/` | Submit feedback, then redirect back to `/` |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{FeedbackRepository, PgFeedbackRepository};
pub use services::FeedbackService;
