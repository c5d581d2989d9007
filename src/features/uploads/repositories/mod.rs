mod uploaded_file_repository;

pub use uploaded_file_repository::*;
