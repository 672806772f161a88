/*!
 * Exam data model.
 *
 * Exam documents are static JSON assets; questions have no fixed schema so
 * they are carried as JSON object maps and only annotated, never reshaped.
 */

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field name added to every question in the vocab bank
pub const SOURCE_EXAM_FIELD: &str = "source_exam";

/// Summary fields that document metadata must not shadow
pub const SUMMARY_RESERVED_FIELDS: [&str; 2] = ["path", "question_count"];

/// Ordered list of exam document paths
pub type ExamIndex = Vec<String>;

/// A free-form question object
pub type Question = Map<String, Value>;

/// Metadata block of an exam document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamInfo {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Any other metadata the document carries
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExamInfo {
    /// Title or empty string when the document has none
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// One exam file: `{ info: {...}, questions: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamDocument {
    #[serde(default, deserialize_with = "lenient_info")]
    pub info: ExamInfo,

    #[serde(default, deserialize_with = "object_items")]
    pub questions: Vec<Question>,
}

// Strings as-is, null as absent, any other JSON value in its compact form
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

// Anything but an object is treated as missing metadata
fn lenient_info<'de, D>(deserializer: D) -> Result<ExamInfo, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => {
            ExamInfo::deserialize(Value::Object(map)).map_err(serde::de::Error::custom)
        }
        Value::Null => Ok(ExamInfo::default()),
        other => {
            warn!("Ignoring exam info that is not an object: {}", other);
            Ok(ExamInfo::default())
        }
    }
}

// Keeps object items, drops everything else
fn object_items<'de, D>(deserializer: D) -> Result<Vec<Question>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(position, item)| match item {
                Value::Object(question) => Some(question),
                other => {
                    warn!("Skipping question {} that is not an object: {}", position, other);
                    None
                }
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!("Ignoring questions that are not a list: {}", other);
            Ok(Vec::new())
        }
    }
}

/// Dashboard entry: a document's metadata plus the path it was loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub path: String,

    #[serde(flatten)]
    pub info: ExamInfo,

    /// Number of questions in the document
    pub question_count: usize,
}

impl ExamSummary {
    /// Summarize a document; `path` and `question_count` always come from the load, not the metadata
    pub fn new(path: impl Into<String>, doc: &ExamDocument) -> Self {
        let mut info = doc.info.clone();
        for field in SUMMARY_RESERVED_FIELDS {
            info.extra.remove(field);
        }

        Self {
            path: path.into(),
            info,
            question_count: doc.questions.len(),
        }
    }
}

/// A question tagged with the title of the exam it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    #[serde(flatten)]
    pub question: Question,

    pub source_exam: String,
}

impl VocabEntry {
    /// Tag a question, replacing any `source_exam` it already carried
    pub fn new(mut question: Question, source_exam: impl Into<String>) -> Self {
        question.remove(SOURCE_EXAM_FIELD);
        Self {
            question,
            source_exam: source_exam.into(),
        }
    }
}
