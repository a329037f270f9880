//! Error types for the program_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for program_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Profile failed validation
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Profile store error
    #[error("Store error: {0}")]
    Store(String),

    /// Remote program generation failed
    #[error("Remote generation error: {0}")]
    Remote(String),

    /// Session log failed validation
    #[error("Invalid session log: {0}")]
    InvalidSessionLog(String),

    /// Program weeks are numbered from 1
    #[error("Invalid week {0}: weeks start at 1")]
    InvalidWeek(u32),
}
