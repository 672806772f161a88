use log::info;
use serde::Serialize;

use crate::errors::SessionError;
use super::state::{AppMode, APP_MODE_KEY, CURRENT_EXAM_PATH_KEY, CURRENT_EXAM_TITLE_KEY};
use super::store::KeyValueStore;

/// Title stored when navigating to the vocab bank
pub const VOCAB_BANK_TITLE: &str = "Vocabulary Bank";

/// Pages the navigator can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Practice,
    Vocab,
}

impl Page {
    /// Document the page is served from
    pub fn target(&self) -> &'static str {
        match self {
            Self::Practice => "practice.html",
            Self::Vocab => "vocab.html",
        }
    }
}

/// Instruction to leave the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Redirect(pub Page);

impl Redirect {
    pub fn target(&self) -> &'static str {
        self.0.target()
    }
}

/// Writes the session flags and names the next page
#[derive(Debug)]
pub struct SessionNavigator<K: KeyValueStore> {
    store: K,
}

impl<K: KeyValueStore> SessionNavigator<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Practice one exam
    pub fn start_exam(&self, path: &str, title: &str) -> Result<Redirect, SessionError> {
        self.write_flags(path, title, AppMode::SingleExam)?;
        info!("Starting exam '{}' ({})", title, path);
        Ok(Redirect(Page::Practice))
    }

    /// Practice the merged vocab bank
    pub fn start_vocab_bank(&self) -> Result<Redirect, SessionError> {
        self.write_flags("", VOCAB_BANK_TITLE, AppMode::VocabBank)?;
        info!("Starting vocab bank");
        Ok(Redirect(Page::Vocab))
    }

    // No rollback: a failed write leaves earlier flags in place
    fn write_flags(&self, path: &str, title: &str, mode: AppMode) -> Result<(), SessionError> {
        self.store.set(CURRENT_EXAM_PATH_KEY, path)?;
        self.store.set(CURRENT_EXAM_TITLE_KEY, title)?;
        self.store.set(APP_MODE_KEY, mode.as_str())?;
        Ok(())
    }
}
