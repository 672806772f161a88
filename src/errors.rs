/*!
 * Error types for the jobvocab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when fetching a static asset from an exam source
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status
    #[error("Server responded with status {status_code} for {path}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Requested asset path
        path: String,
    },

    /// The asset does not exist in the source
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset path could not be resolved against the source location
    #[error("Invalid asset path '{path}': {reason}")]
    InvalidPath {
        /// Requested asset path
        path: String,
        /// Why resolution failed
        reason: String,
    },

    /// Reading a local asset failed
    #[error("IO error: {0}")]
    Io(String),

    /// The asset was fetched but is not valid JSON of the expected shape
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Requested asset path
        path: String,
        /// Parser message
        message: String,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error.to_string())
    }
}

/// Errors that can occur when reading or writing session flags
#[derive(Error, Debug)]
pub enum SessionError {
    /// The key-value store rejected an operation
    #[error("Key-value store error: {0}")]
    Store(String),

    /// The store lock was poisoned by a panicking writer
    #[error("Key-value store lock poisoned")]
    LockPoisoned,
}

impl From<rusqlite::Error> for SessionError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Store(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a configuration file or value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from fetching exam data
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from the session store
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
