//! Error types for IngreChef
//!
//! All errors use thiserror for structured error handling.
//! Read paths in the stores never return these; they degrade to defaults.
//! Write paths that the user must hear about, and every network call, do.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {status}")]
    Api { status: u16, body: String },

    #[error("Daily limit of {limit} API requests reached")]
    QuotaExceeded { limit: u32 },

    #[error("No ingredients given")]
    EmptyIngredients,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Text shown to the user when a flow fails.
    ///
    /// Network failures collapse to one generic message; the detail goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::QuotaExceeded { limit } => format!(
                "You have reached your daily limit of {} API requests. Please try again tomorrow.",
                limit
            ),
            AppError::EmptyIngredients => "Please enter some ingredients".to_string(),
            AppError::Validation(msg) | AppError::Config(msg) => msg.clone(),
            AppError::Http(_) | AppError::Api { .. } => {
                "Failed to fetch recipes. Please try again.".to_string()
            }
            AppError::Database(_) | AppError::Io(_) | AppError::Serialization(_) => {
                "Failed to save your changes".to_string()
            }
            AppError::Generic(msg) => msg.clone(),
        }
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
