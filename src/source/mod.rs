/*!
 * Exam sources for fetching static assets.
 *
 * This module contains the transports the exam loader can read from:
 * - HTTP: the static site that serves the index and exam documents
 * - Directory: a local checkout of the same JSON files
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{SourceConfig, SourceKind};
use crate::errors::FetchError;

/// Common trait for all exam sources
///
/// A source only knows how to turn an asset path into its raw text; parsing
/// and failure policy live in the exam loader.
#[async_trait]
pub trait ExamSource: Send + Sync + Debug {
    /// Fetch the raw text of an asset
    ///
    /// # Arguments
    /// * `path` - Asset path as listed in the index, relative to the source location
    ///
    /// # Returns
    /// * `Result<String, FetchError>` - The asset body or an error
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;

    /// Human readable location for log messages
    fn describe(&self) -> String;
}

/// Build the source selected by the configuration
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn ExamSource>, FetchError> {
    match config.kind {
        SourceKind::Http => Ok(Box::new(http::HttpSource::new(&config.location)?)),
        SourceKind::Directory => Ok(Box::new(directory::DirectorySource::new(&config.location))),
    }
}

#[async_trait]
impl<T: ExamSource + ?Sized> ExamSource for Box<T> {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        (**self).fetch_text(path).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub mod directory;
pub mod http;
