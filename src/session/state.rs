use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::SessionError;
use super::store::KeyValueStore;

/// Key holding the path of the exam being practiced
pub const CURRENT_EXAM_PATH_KEY: &str = "currentExamPath";

/// Key holding the title of the exam being practiced
pub const CURRENT_EXAM_TITLE_KEY: &str = "currentExamTitle";

/// Key holding the page mode
pub const APP_MODE_KEY: &str = "appMode";

/// Which question set the next page should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    /// One exam's questions
    SingleExam,
    /// The merged vocab bank
    VocabBank,
}

impl AppMode {
    /// Stored flag value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleExam => "single_exam",
            Self::VocabBank => "vocab_bank",
        }
    }
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_exam" => Ok(Self::SingleExam),
            "vocab_bank" => Ok(Self::VocabBank),
            _ => Err(format!("Unknown app mode: {}", s)),
        }
    }
}

/// Session flags as read back from the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_exam_path: Option<String>,
    pub current_exam_title: Option<String>,
    pub app_mode: Option<AppMode>,
}

impl SessionState {
    /// Read the flags; missing keys and unknown modes come back as `None`
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self, SessionError> {
        let app_mode = match store.get(APP_MODE_KEY)? {
            Some(raw) => match raw.parse::<AppMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!("Ignoring stored session flag: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            current_exam_path: store.get(CURRENT_EXAM_PATH_KEY)?,
            current_exam_title: store.get(CURRENT_EXAM_TITLE_KEY)?,
            app_mode,
        })
    }
}
