use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::NewUploadedFile;
use crate::features::uploads::models::UploadedFile;
use crate::features::uploads::repositories::UploadedFileRepository;
use crate::modules::storage::LocalFileStore;
use crate::shared::validation::secure_filename;

/// Service for file uploads and downloads
pub struct UploadService {
    repository: Arc<dyn UploadedFileRepository>,
    store: Arc<LocalFileStore>,
}

impl UploadService {
    pub fn new(repository: Arc<dyn UploadedFileRepository>, store: Arc<LocalFileStore>) -> Self {
        Self { repository, store }
    }

    /// Save file content to disk and record its metadata
    ///
    /// # Arguments
    /// * `original_filename` - The filename as sent by the client
    /// * `data` - The file content as bytes
    ///
    /// # Returns
    /// The stored metadata record. Content already on disk under the same
    /// sanitized name is replaced.
    pub async fn store_upload(&self, original_filename: &str, data: &[u8]) -> Result<UploadedFile> {
        let filename = secure_filename(original_filename);
        if filename.is_empty() {
            return Err(AppError::Validation(format!(
                "Filename '{}' has no usable characters",
                original_filename
            )));
        }

        // File before record; a failed insert can leave an orphaned file
        self.store.upload(&filename, data).await?;
        debug!("File content written: {}", filename);

        let file = self
            .repository
            .insert(&NewUploadedFile {
                filename,
                original_filename: original_filename.to_string(),
            })
            .await?;

        info!(
            "Uploaded file saved: id={}, filename={}, size={}",
            file.id,
            file.filename,
            data.len()
        );

        Ok(file)
    }

    pub async fn list(&self) -> Result<Vec<UploadedFile>> {
        self.repository.list_all().await
    }

    /// Path of a downloadable file in the upload directory
    ///
    /// Any regular file present in the directory qualifies, recorded or not.
    pub async fn locate(&self, filename: &str) -> Result<PathBuf> {
        let not_found = || AppError::NotFound("File not found".to_string());

        let path = self.store.resolve(filename).ok_or_else(not_found)?;
        if !self.store.exists(filename).await? {
            return Err(not_found());
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use crate::shared::test_helpers::InMemoryUploadedFileRepository;

    fn service_in(dir: &std::path::Path) -> UploadService {
        let store = LocalFileStore::new(StorageConfig {
            upload_dir: dir.to_path_buf(),
        });
        UploadService::new(
            Arc::new(InMemoryUploadedFileRepository::default()),
            Arc::new(store),
        )
    }

    #[tokio::test]
    async fn test_store_upload_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let file = service
            .store_upload("../My Report.txt", b"hello")
            .await
            .unwrap();

        assert_eq!(file.filename, "My_Report.txt");
        assert_eq!(file.original_filename, "../My Report.txt");
        assert_eq!(
            tokio::fs::read(dir.path().join("My_Report.txt")).await.unwrap(),
            b"hello"
        );
    }

    #[tokio::test]
    async fn test_store_upload_rejects_unusable_name() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let result = service.store_upload("../..", b"hello").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_colliding_names_overwrite_content_keep_records() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        service.store_upload("a b.txt", b"one").await.unwrap();
        service.store_upload("a_b.txt", b"two").await.unwrap();

        let files = service.list().await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, files[1].filename);
        assert_ne!(files[0].id, files[1].id);

        let path = service.locate("a_b.txt").await.unwrap();
        assert_eq!(tokio::fs::read(path).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_locate_missing_or_outside_dir() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        assert!(matches!(
            service.locate("missing.txt").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.locate("..").await,
            Err(AppError::NotFound(_))
        ));
    }
}
