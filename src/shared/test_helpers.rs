#![cfg(test)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::core::app::{build_router, AppContext};
use crate::core::config::{AppConfig, StorageConfig};
use crate::core::error::{AppError, Result};
use crate::core::notice::NoticeSigner;
use crate::core::state::WebContext;
use crate::features::feedback::dtos::NewFeedback;
use crate::features::feedback::models::Feedback;
use crate::features::feedback::{FeedbackRepository, FeedbackService};
use crate::features::uploads::dtos::NewUploadedFile;
use crate::features::uploads::models::UploadedFile;
use crate::features::uploads::{UploadService, UploadedFileRepository};
use crate::features::weather::WeatherService;
use crate::modules::storage::LocalFileStore;
use crate::shared::templates::Templates;

pub const TEST_SECRET_KEY: &str = "test-secret-key";

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    rows: Mutex<Vec<Feedback>>,
}

impl InMemoryFeedbackRepository {
    pub fn all(&self) -> Vec<Feedback> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback> {
        let mut rows = self.rows.lock().unwrap();
        let row = Feedback {
            id: rows.len() as i32 + 1,
            name: feedback.name.clone(),
            email: feedback.email.clone(),
            message: feedback.message.clone(),
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Feedback>> {
        Ok(self.all())
    }
}

#[derive(Default)]
pub struct InMemoryUploadedFileRepository {
    rows: Mutex<Vec<UploadedFile>>,
}

impl InMemoryUploadedFileRepository {
    pub fn all(&self) -> Vec<UploadedFile> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadedFileRepository for InMemoryUploadedFileRepository {
    async fn insert(&self, file: &NewUploadedFile) -> Result<UploadedFile> {
        let mut rows = self.rows.lock().unwrap();
        let row = UploadedFile {
            id: rows.len() as i32 + 1,
            filename: file.filename.clone(),
            original_filename: file.original_filename.clone(),
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<UploadedFile>> {
        Ok(self.all())
    }
}

/// Feedback store whose connection is always gone
pub struct UnavailableFeedbackRepository;

#[async_trait]
impl FeedbackRepository for UnavailableFeedbackRepository {
    async fn insert(&self, _feedback: &NewFeedback) -> Result<Feedback> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_all(&self) -> Result<Vec<Feedback>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Running router over in-memory stores and a temporary upload directory
pub struct TestApp {
    pub server: TestServer,
    pub feedback: Arc<InMemoryFeedbackRepository>,
    pub uploads: Arc<InMemoryUploadedFileRepository>,
    /// Parent of the upload directory
    pub root: TempDir,
}

impl TestApp {
    pub fn upload_dir(&self) -> std::path::PathBuf {
        self.root.path().join("uploads")
    }
}

pub fn test_web_context() -> WebContext {
    WebContext::new(
        Templates::new().unwrap(),
        NoticeSigner::new(TEST_SECRET_KEY),
    )
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_body_limit(AppConfig::DEFAULT_MAX_REQUEST_BODY_SIZE).await
}

pub async fn spawn_app_with_body_limit(max_request_body_size: usize) -> TestApp {
    let root = tempfile::tempdir().unwrap();
    let store = LocalFileStore::new(StorageConfig {
        upload_dir: root.path().join("uploads"),
    });
    store.ensure_dir_exists().await.unwrap();

    let feedback = Arc::new(InMemoryFeedbackRepository::default());
    let uploads = Arc::new(InMemoryUploadedFileRepository::default());

    let router = build_router(AppContext {
        web: test_web_context(),
        feedback_service: Arc::new(FeedbackService::new(feedback.clone())),
        weather_service: Arc::new(WeatherService::new()),
        upload_service: Arc::new(UploadService::new(uploads.clone(), Arc::new(store))),
        max_request_body_size,
    });

    TestApp {
        server: TestServer::new(router).unwrap(),
        feedback,
        uploads,
        root,
    }
}

/// Router whose feedback store fails every call
pub async fn spawn_app_with_unavailable_store() -> TestServer {
    let root = tempfile::tempdir().unwrap();
    let store = LocalFileStore::new(StorageConfig {
        upload_dir: root.path().to_path_buf(),
    });

    let router = build_router(AppContext {
        web: test_web_context(),
        feedback_service: Arc::new(FeedbackService::new(Arc::new(
            UnavailableFeedbackRepository,
        ))),
        weather_service: Arc::new(WeatherService::new()),
        upload_service: Arc::new(UploadService::new(
            Arc::new(InMemoryUploadedFileRepository::default()),
            Arc::new(store),
        )),
        max_request_body_size: AppConfig::DEFAULT_MAX_REQUEST_BODY_SIZE,
    });

    TestServer::new(router).unwrap()
}
