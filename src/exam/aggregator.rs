/*!
 * Aggregation of loaded exam documents.
 *
 * Both views take the `(path, document)` pairs produced by the loader in index
 * order; entries whose document failed to load are skipped.
 */

use super::models::{ExamDocument, ExamSummary, VocabEntry};

/// Outcome of loading one index entry
pub type LoadedExam = (String, Option<ExamDocument>);

/// One summary per successfully loaded document, in index order
pub fn summarize(loaded: &[LoadedExam]) -> Vec<ExamSummary> {
    loaded
        .iter()
        .filter_map(|(path, doc)| doc.as_ref().map(|doc| ExamSummary::new(path.as_str(), doc)))
        .collect()
}

/// Every question of every loaded document, tagged with its exam title
///
/// Order is index order, then in-document order. Identical questions from
/// different exams are all kept.
pub fn vocab_bank(loaded: Vec<LoadedExam>) -> Vec<VocabEntry> {
    loaded
        .into_iter()
        .filter_map(|(_, doc)| doc)
        .flat_map(|doc| {
            let title = doc.info.title_or_empty().to_string();
            doc.questions
                .into_iter()
                .map(move |question| VocabEntry::new(question, title.clone()))
        })
        .collect()
}
