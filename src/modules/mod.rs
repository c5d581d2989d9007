//! Modules layer - Infrastructure components
//!
//! Contains adapters for external resources like the file system.

pub mod storage;
