//! File upload manager and raw file download.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/upload` | Upload form and all uploaded files |
//! | POST | `/upload` | Store a multipart `file`, then redirect back to `/upload` |
//! | GET | `/uploads/{filename}` | Raw bytes of a file in the upload directory |
//!
//! Stored names are sanitized client names, so two uploads that sanitize to
//! the same name share one file on disk (the later upload wins) while each
//! keeps its own metadata record.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgUploadedFileRepository, UploadedFileRepository};
pub use services::UploadService;
