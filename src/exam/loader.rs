use futures::future::join_all;
use log::{debug, error, info, warn};

use crate::errors::FetchError;
use crate::source::ExamSource;
use super::aggregator::{self, LoadedExam};
use super::models::{ExamDocument, ExamIndex, ExamSummary, Question, VocabEntry};

// @module: Index and exam document fetching

/// Fetches the index and exam documents from a source
///
/// Every failure is logged and degrades to an absent result; nothing is
/// retried and no error reaches the caller.
#[derive(Debug)]
pub struct ExamLoader<S: ExamSource> {
    // @field: Asset transport
    source: S,
    // @field: Manifest path
    index_path: String,
}

impl<S: ExamSource> ExamLoader<S> {
    pub fn new(source: S, index_path: impl Into<String>) -> Self {
        Self {
            source,
            index_path: index_path.into(),
        }
    }

    /// Underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the manifest; an unreachable or malformed index is an empty one
    pub async fn load_index(&self) -> ExamIndex {
        match self.try_load_index().await {
            Ok(index) => {
                debug!("Index lists {} exam(s)", index.len());
                index
            }
            Err(e) => {
                error!("Could not load exam index from {}: {}", self.source.describe(), e);
                Vec::new()
            }
        }
    }

    async fn try_load_index(&self) -> Result<ExamIndex, FetchError> {
        let text = self.source.fetch_text(&self.index_path).await?;
        serde_json::from_str::<ExamIndex>(&text).map_err(|e| FetchError::Parse {
            path: self.index_path.clone(),
            message: e.to_string(),
        })
    }

    /// Fetch one exam document; `None` when it cannot be fetched or parsed
    pub async fn load_document(&self, path: &str) -> Option<ExamDocument> {
        match self.try_load_document(path).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                error!("Skipping exam {}: {}", path, e);
                None
            }
        }
    }

    async fn try_load_document(&self, path: &str) -> Result<ExamDocument, FetchError> {
        let text = self.source.fetch_text(path).await?;
        serde_json::from_str::<ExamDocument>(&text).map_err(|e| FetchError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch every listed document concurrently and wait for all of them
    ///
    /// The result has one entry per index path, in index order.
    pub async fn load_all(&self, index: &[String]) -> Vec<LoadedExam> {
        let fetches = index.iter().map(|path| async move {
            let doc = self.load_document(path).await;
            (path.clone(), doc)
        });

        let loaded = join_all(fetches).await;

        let failed = loaded.iter().filter(|(_, doc)| doc.is_none()).count();
        if failed > 0 {
            warn!("{} of {} exam(s) could not be loaded", failed, loaded.len());
        }

        loaded
    }

    /// Index, fetch and summarize for the home dashboard
    pub async fn exam_summaries(&self) -> Vec<ExamSummary> {
        let index = self.load_index().await;
        let loaded = self.load_all(&index).await;
        let summaries = aggregator::summarize(&loaded);
        info!("Loaded {} exam(s)", summaries.len());
        summaries
    }

    /// Index, fetch and merge every exam's questions
    pub async fn vocab_bank(&self) -> Vec<VocabEntry> {
        let index = self.load_index().await;
        let loaded = self.load_all(&index).await;
        let bank = aggregator::vocab_bank(loaded);
        info!("Vocab bank holds {} question(s)", bank.len());
        bank
    }

    /// Questions of a single exam, empty when it cannot be loaded
    pub async fn exam_questions(&self, path: &str) -> Vec<Question> {
        self.load_document(path)
            .await
            .map(|doc| doc.questions)
            .unwrap_or_default()
    }

    /// Title of an exam as listed in its document, if it loads
    pub async fn exam_title(&self, path: &str) -> Option<String> {
        self.load_document(path).await.and_then(|doc| doc.info.title)
    }
}
