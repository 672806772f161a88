/*!
 * Exam loading and aggregation.
 *
 * - `models`: index, documents, summaries and vocab entries
 * - `loader`: fail-soft fetching of the index and documents
 * - `aggregator`: dashboard summaries and the merged vocab bank
 */

pub mod aggregator;
pub mod loader;
pub mod models;

// Re-export main types
pub use loader::ExamLoader;
pub use models::{ExamDocument, ExamIndex, ExamInfo, ExamSummary, Question, VocabEntry};
