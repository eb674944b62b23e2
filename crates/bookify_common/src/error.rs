// --- File: crates/bookify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across the Bookify crates.
///
/// Each crate keeps its own specific error enum and converts into this one at
/// the HTTP boundary, where the variant decides the response status.
#[derive(Error, Debug)]
pub enum BookifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred reading or writing the data document
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookifyError {
    fn status_code(&self) -> u16 {
        match self {
            BookifyError::HttpError(_) => 500,
            BookifyError::ParseError(_) => 400,
            BookifyError::ConfigError(_) => 500,
            BookifyError::AuthError(_) => 401,
            BookifyError::ValidationError(_) => 400,
            BookifyError::StorageError(_) => 500,
            BookifyError::ExternalServiceError { .. } => 502,
            BookifyError::NotFoundError(_) => 404,
            BookifyError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, BookifyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, BookifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, BookifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| BookifyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, BookifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| BookifyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for BookifyError {
    fn from(err: reqwest::Error) -> Self {
        BookifyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BookifyError {
    fn from(err: serde_json::Error) -> Self {
        BookifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for BookifyError {
    fn from(err: std::io::Error) -> Self {
        BookifyError::StorageError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ConfigError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::AuthError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ValidationError(message.to_string())
}

pub fn storage_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::StorageError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BookifyError {
    BookifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::InternalError(message.to_string())
}
