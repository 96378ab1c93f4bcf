// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("HTML parsing error: {0}")]
    Html(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document read failed: {0}")]
    Read(#[from] ReadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid collection input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
