use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::feedback::dtos::NewFeedback;
use crate::features::feedback::models::Feedback;

/// Persistence for feedback entries
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback>;
    /// All entries in insertion order
    async fn list_all(&self) -> Result<Vec<Feedback>>;
}

pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(&feedback.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, name, email, message, created_at
            FROM feedback
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
