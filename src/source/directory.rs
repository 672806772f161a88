use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::FetchError;
use super::ExamSource;

/// Local directory holding the index and exam documents
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve an asset path under the root; leading slashes are site-relative
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ExamSource for DirectorySource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full_path = self.resolve(path);
        debug!("Reading {:?}", full_path);

        tokio::fs::read_to_string(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            _ => FetchError::Io(format!("{:?}: {}", full_path, e)),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
