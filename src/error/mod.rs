//! Error handling module for ClipSift

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type at the library boundary
#[derive(Error, Debug)]
pub enum ClipSiftError {
    /// Configuration file could not be read or is invalid
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Configuration file is not valid TOML
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {message}")]
    LoggingInit { message: String },

    /// A batch-level step failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for ClipSift operations
pub type ClipSiftResult<T> = std::result::Result<T, ClipSiftError>;
