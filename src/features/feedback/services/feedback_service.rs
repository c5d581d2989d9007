use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::feedback::dtos::{FeedbackFormDto, NewFeedback};
use crate::features::feedback::models::Feedback;
use crate::features::feedback::repositories::FeedbackRepository;

/// Service for collecting feedback
pub struct FeedbackService {
    repository: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(repository: Arc<dyn FeedbackRepository>) -> Self {
        Self { repository }
    }

    /// Clean and store a submitted form.
    ///
    /// Returns `AppError::Validation` without touching the store when any
    /// field is empty after trimming.
    pub async fn submit(&self, form: FeedbackFormDto) -> Result<Feedback> {
        let feedback = NewFeedback::from(form);
        feedback
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let saved = self.repository.insert(&feedback).await?;

        tracing::info!("Feedback saved: id={}", saved.id);

        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Feedback>> {
        self.repository.list_all().await
    }
}
