use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database model for uploaded file metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UploadedFile {
    pub id: i32,
    /// Sanitized name the content is stored under
    pub filename: String,
    /// Name exactly as sent by the client
    pub original_filename: String,
    pub created_at: DateTime<Utc>,
}
