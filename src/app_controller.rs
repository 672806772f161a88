use log::{debug, info, warn};
use serde::Serialize;

use crate::errors::SessionError;
use crate::exam::{ExamLoader, ExamSummary, Question, VocabEntry};
use crate::session::{AppMode, KeyValueStore, Redirect, SessionNavigator, SessionState};
use crate::source::ExamSource;

// @module: Page controller tying exam loading to session navigation

/// What a page load renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    /// Dashboard of available exams; empty means nothing could be loaded
    Home { exams: Vec<ExamSummary> },
    /// One exam's questions
    Practice {
        path: String,
        title: String,
        questions: Vec<Question>,
    },
    /// The merged vocab bank
    Vocab { title: String, entries: Vec<VocabEntry> },
}

/// Main application controller
pub struct Controller<S: ExamSource, K: KeyValueStore> {
    // @field: Exam fetching and aggregation
    loader: ExamLoader<S>,
    // @field: Session flag writer
    navigator: SessionNavigator<K>,
}

impl<S: ExamSource, K: KeyValueStore> Controller<S, K> {
    pub fn new(loader: ExamLoader<S>, navigator: SessionNavigator<K>) -> Self {
        Self { loader, navigator }
    }

    pub fn loader(&self) -> &ExamLoader<S> {
        &self.loader
    }

    pub fn store(&self) -> &K {
        self.navigator.store()
    }

    /// Home dashboard
    pub async fn home(&self) -> PageView {
        PageView::Home {
            exams: self.loader.exam_summaries().await,
        }
    }

    /// Navigate to an exam; without a title the exam's own title is looked up
    /// when the index lists it
    pub async fn start_exam(&self, path: &str, title: Option<&str>) -> Result<Redirect, SessionError> {
        let title = match title {
            Some(title) => title.to_string(),
            None => self.indexed_title(path).await.unwrap_or_else(|| {
                warn!("No title found for {}, using the path instead", path);
                path.to_string()
            }),
        };

        self.navigator.start_exam(path, &title)
    }

    async fn indexed_title(&self, path: &str) -> Option<String> {
        let index = self.loader.load_index().await;
        if !index.iter().any(|listed| listed == path) {
            warn!("{} is not listed in the exam index", path);
            return None;
        }

        self.loader.exam_title(path).await
    }

    /// Navigate to the vocab bank
    pub fn start_vocab_bank(&self) -> Result<Redirect, SessionError> {
        self.navigator.start_vocab_bank()
    }

    /// Current session flags
    pub fn session(&self) -> Result<SessionState, SessionError> {
        SessionState::load(self.navigator.store())
    }

    /// Render the page the stored session points at
    pub async fn open_page(&self) -> Result<PageView, SessionError> {
        let state = self.session()?;
        debug!("Opening page for session {:?}", state);

        let view = match (state.app_mode, state.current_exam_path) {
            (Some(AppMode::SingleExam), Some(path)) if !path.is_empty() => {
                let questions = self.loader.exam_questions(&path).await;
                info!("Practice page: {} question(s) from {}", questions.len(), path);
                PageView::Practice {
                    title: state.current_exam_title.unwrap_or_else(|| path.clone()),
                    path,
                    questions,
                }
            }
            (Some(AppMode::VocabBank), _) => PageView::Vocab {
                title: state
                    .current_exam_title
                    .unwrap_or_else(|| crate::session::navigator::VOCAB_BANK_TITLE.to_string()),
                entries: self.loader.vocab_bank().await,
            },
            _ => {
                info!("No session selected, showing the exam list");
                self.home().await
            }
        };

        Ok(view)
    }
}
