use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database model for a feedback entry
///
/// `name`, `email` and `message` are stored HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Feedback {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
