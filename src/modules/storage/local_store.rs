//! Local-disk storage for uploaded files
//!
//! Files live flat in a single upload directory and are addressed by key,
//! which is always a single path component. Anything that could resolve
//! outside the directory is rejected.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Upload directory on local disk
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            root: config.upload_dir,
        }
    }

    /// Create the upload directory if it doesn't exist
    pub async fn ensure_dir_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        info!("Upload directory ready: {}", self.root.display());
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path strictly inside the upload directory.
    ///
    /// Returns `None` for keys with separators, `.`/`..`, NUL bytes,
    /// or more than one path component.
    pub fn resolve(&self, key: &str) -> Option<PathBuf> {
        if key.contains(['/', '\\', '\0']) {
            return None;
        }

        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }

    /// Write file content under `key`, replacing any existing file
    ///
    /// # Returns
    /// The path the content was written to
    pub async fn upload(&self, key: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        let path = self
            .resolve(key)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid storage key '{}'", key)))?;

        tokio::fs::write(&path, data).await?;

        debug!("Stored {} bytes at '{}'", data.len(), path.display());
        Ok(path)
    }

    /// Check if a regular file exists under `key`
    pub async fn exists(&self, key: &str) -> Result<bool, AppError> {
        let Some(path) = self.resolve(key) else {
            return Ok(false);
        };

        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> LocalFileStore {
        LocalFileStore::new(StorageConfig {
            upload_dir: dir.to_path_buf(),
        })
    }

    #[test]
    fn test_resolve_accepts_plain_names() {
        let store = store_in(Path::new("uploads"));
        assert_eq!(
            store.resolve("report.txt"),
            Some(PathBuf::from("uploads/report.txt"))
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = store_in(Path::new("uploads"));
        assert!(store.resolve("").is_none());
        assert!(store.resolve(".").is_none());
        assert!(store.resolve("..").is_none());
        assert!(store.resolve("../secret.txt").is_none());
        assert!(store.resolve("nested/file.txt").is_none());
        assert!(store.resolve(r"..\secret.txt").is_none());
        assert!(store.resolve("/etc/passwd").is_none());
        assert!(store.resolve("bad\0name").is_none());
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store.upload("a.txt", b"first").await.unwrap();
        let path = store.upload("a.txt", b"second").await.unwrap();

        assert_eq!(tokio::fs::read(path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(!store.exists("missing.txt").await.unwrap());
        store.upload("present.txt", b"x").await.unwrap();
        assert!(store.exists("present.txt").await.unwrap());
        assert!(!store.exists("../present.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_ensure_dir_exists_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir.path().join("a").join("b"));

        store.ensure_dir_exists().await.unwrap();
        assert!(store.root().is_dir());
    }
}
