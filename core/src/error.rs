//! Error types and handling for autocomplete core

use thiserror::Error;

/// Result type alias for autocomplete operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for autocomplete core
#[derive(Error, Debug)]
pub enum Error {
    /// Settings-related errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Settings-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// The raw blob is not well-formed JSON
    #[error("Malformed settings data: {message}")]
    Syntax { message: String },

    /// Well-formed JSON with the wrong structure or field types
    #[error("Invalid settings shape: {message}")]
    Shape { message: String },

    /// Settings could not be serialized
    #[error("Failed to encode settings: {message}")]
    Encode { message: String },

    #[error("Unknown settings field: {name}")]
    UnknownField { name: String },

    #[error("Field '{field}' is required and cannot be cleared")]
    NotClearable { field: String },
}

impl SettingsError {
    /// Classify a JSON error into a syntax or shape failure
    pub fn from_json(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => SettingsError::Shape {
                message: err.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => SettingsError::Syntax {
                message: err.to_string(),
            },
        }
    }
}
