//! Theme engine error types

use thiserror::Error;

/// Template loading and rendering errors
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Template override directory is missing
    #[error("Template directory not found: {0}")]
    NotFound(String),

    /// Template parse or render error
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Template file is not valid UTF-8
    #[error("Template '{0}' is not valid UTF-8")]
    InvalidEncoding(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
