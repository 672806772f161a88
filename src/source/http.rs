use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::errors::FetchError;
use super::ExamSource;

/// Static site client for exam assets
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// Base URL every asset path is resolved against
    base_url: Url,
    /// HTTP client shared by all concurrent fetches
    client: Client,
}

impl HttpSource {
    /// Create a new source rooted at the given base URL
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new source that uses a preconfigured client
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, FetchError> {
        // Without a trailing slash Url::join would replace the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| FetchError::InvalidPath {
            path: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { base_url, client })
    }

    /// Resolve an asset path against the base URL
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url.join(path).map_err(|e| FetchError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ExamSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}
