//! Storage module for uploaded files
//!
//! Provides a local-disk store for uploaded file contents.

mod local_store;

pub use local_store::LocalFileStore;
