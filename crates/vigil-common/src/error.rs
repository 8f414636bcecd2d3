//! Error types for Vigil.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VigilError {
    #[error("Specialist error: {0}")]
    Specialist(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Thread teardown error: {0}")]
    Teardown(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VigilError>;
