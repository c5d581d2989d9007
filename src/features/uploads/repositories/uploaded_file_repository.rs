use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::uploads::dtos::NewUploadedFile;
use crate::features::uploads::models::UploadedFile;

/// Persistence for uploaded file metadata
#[async_trait]
pub trait UploadedFileRepository: Send + Sync {
    async fn insert(&self, file: &NewUploadedFile) -> Result<UploadedFile>;
    /// All records in insertion order
    async fn list_all(&self) -> Result<Vec<UploadedFile>>;
}

pub struct PgUploadedFileRepository {
    pool: PgPool,
}

impl PgUploadedFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadedFileRepository for PgUploadedFileRepository {
    async fn insert(&self, file: &NewUploadedFile) -> Result<UploadedFile> {
        let row = sqlx::query_as::<_, UploadedFile>(
            r#"
            INSERT INTO uploaded_file (filename, original_filename)
            VALUES ($1, $2)
            RETURNING id, filename, original_filename, created_at
            "#,
        )
        .bind(&file.filename)
        .bind(&file.original_filename)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<UploadedFile>> {
        let rows = sqlx::query_as::<_, UploadedFile>(
            r#"
            SELECT id, filename, original_filename, created_at
            FROM uploaded_file
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
