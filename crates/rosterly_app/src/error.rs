//! Custom error types for the application services.

use thiserror::Error;

/// Application-side errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] rosterly_client::RosterlyError),

    #[error("{0}")]
    Version(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;
