/*!
 * Tests for exam loading and aggregation
 */

use serde_json::json;
use std::time::Duration;

use jobvocab::exam::ExamLoader;
use crate::common;
use crate::common::mock_source::MockSource;

fn sample_source() -> MockSource {
    MockSource::new()
        .with_asset("index.json", r#"["a.json", "b.json", "c.json"]"#)
        .with_asset(
            "a.json",
            r#"{"info":{"title":"Exam A","date":"2023-01-01","category":"Bank"},"questions":[{"q":"1"},{"q":"2"}]}"#,
        )
        .with_asset("c.json", r#"{"info":{"title":"Exam C"},"questions":[{"q":"3"}]}"#)
}

/// The worked example: one exam loads, the other is missing
#[tokio::test]
async fn test_vocab_bank_withOneMissingExam_shouldTagSurvivingQuestions() {
    common::init_test_logging();
    let source = MockSource::new()
        .with_asset("index.json", r#"["a.json","b.json"]"#)
        .with_asset("a.json", r#"{"info":{"title":"Exam A"},"questions":[{"q":"1"}]}"#);
    let loader = ExamLoader::new(source, "index.json");

    let bank = loader.vocab_bank().await;

    assert_eq!(serde_json::to_value(&bank).unwrap(), json!([{ "q": "1", "source_exam": "Exam A" }]));
}

#[tokio::test]
async fn test_exam_summaries_withMissingExam_shouldReturnSurvivorsInIndexOrder() {
    let loader = ExamLoader::new(sample_source(), "index.json");

    let summaries = loader.exam_summaries().await;

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].path, "a.json");
    assert_eq!(summaries[0].info.title.as_deref(), Some("Exam A"));
    assert_eq!(summaries[0].info.category.as_deref(), Some("Bank"));
    assert_eq!(summaries[0].question_count, 2);
    assert_eq!(summaries[1].path, "c.json");
}

#[tokio::test]
async fn test_vocab_bank_shouldFollowIndexThenDocumentOrder() {
    let loader = ExamLoader::new(sample_source(), "index.json");

    let bank = loader.vocab_bank().await;

    let prompts: Vec<&str> = bank.iter().map(|e| e.question["q"].as_str().unwrap()).collect();
    assert_eq!(prompts, vec!["1", "2", "3"]);
    assert!(bank[..2].iter().all(|e| e.source_exam == "Exam A"));
    assert_eq!(bank[2].source_exam, "Exam C");
}

#[tokio::test]
async fn test_load_index_withMissingIndex_shouldBeEmpty() {
    let loader = ExamLoader::new(MockSource::new(), "index.json");

    assert!(loader.load_index().await.is_empty());
    assert!(loader.exam_summaries().await.is_empty());
    assert!(loader.vocab_bank().await.is_empty());
}

#[tokio::test]
async fn test_load_index_withMalformedIndex_shouldBeEmpty() {
    let source = MockSource::new().with_asset("index.json", r#"{"exams": ["a.json"]}"#);
    let loader = ExamLoader::new(source, "index.json");

    assert!(loader.load_index().await.is_empty());
}

#[tokio::test]
async fn test_empty_index_shouldYieldEmptyResultsWithoutFetchingDocuments() {
    let source = MockSource::new().with_asset("index.json", "[]");
    let tracker = source.tracker();
    let loader = ExamLoader::new(source, "index.json");

    assert!(loader.exam_summaries().await.is_empty());
    assert!(loader.vocab_bank().await.is_empty());
    assert_eq!(tracker.lock().unwrap().requested, vec!["index.json", "index.json"]);
}

#[tokio::test]
async fn test_load_document_withCorruptJson_shouldBeNone() {
    let source = MockSource::new()
        .with_asset("bad.json", "{ \"info\": ")
        .with_asset("scalar.json", "42");
    let loader = ExamLoader::new(source, "index.json");

    assert!(loader.load_document("bad.json").await.is_none());
    assert!(loader.load_document("scalar.json").await.is_none());
    assert!(loader.exam_questions("bad.json").await.is_empty());
}

#[tokio::test]
async fn test_load_all_shouldFetchConcurrentlyAndKeepIndexOrder() {
    let source = sample_source()
        .with_delay("a.json", Duration::from_millis(60))
        .with_delay("b.json", Duration::from_millis(30))
        .with_delay("c.json", Duration::from_millis(5));
    let tracker = source.tracker();
    let loader = ExamLoader::new(source, "index.json");

    let index = loader.load_index().await;
    let loaded = loader.load_all(&index).await;

    let paths: Vec<&str> = loaded.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths, vec!["a.json", "b.json", "c.json"]);
    assert!(loaded[0].1.is_some());
    assert!(loaded[1].1.is_none());
    assert!(loaded[2].1.is_some());
    assert_eq!(tracker.lock().unwrap().peak_in_flight, 3);
}

#[tokio::test]
async fn test_exam_title_shouldReadDocumentInfo() {
    let loader = ExamLoader::new(sample_source(), "index.json");

    assert_eq!(loader.exam_title("c.json").await.as_deref(), Some("Exam C"));
    assert_eq!(loader.exam_title("b.json").await, None);
}

/// Loader calls also work from synchronous code driving its own runtime
#[test]
fn test_exam_questions_fromBlockingContext_shouldReturnDocumentQuestions() {
    let loader = ExamLoader::new(sample_source(), "index.json");

    let questions = tokio_test::block_on(loader.exam_questions("a.json"));

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1]["q"], "2");
}

fn loosely_typed_source() -> MockSource {
    MockSource::new()
        .with_asset("index.json", r#"["a.json", "b.json", "c.json", "d.json"]"#)
        .with_asset("a.json", r#"{"info":{"title":"Exam A","date":2023},"questions":[{"q":"1"}]}"#)
        .with_asset("b.json", r#"{"info":{"title":"Exam B"},"questions":[{"q":"2"},"stray"]}"#)
        .with_asset("c.json", r#"{"info":{"title":"Exam C"},"questions":[{"q":"3"}]}"#)
        .with_asset("d.json", r#"{"info":null,"questions":[{"q":"4"}]}"#)
}

#[tokio::test]
async fn test_load_document_withNumericDate_shouldKeepExam() {
    let loader = ExamLoader::new(loosely_typed_source(), "index.json");

    let doc = loader.load_document("a.json").await.expect("exam with numeric date should load");

    assert_eq!(doc.info.title.as_deref(), Some("Exam A"));
    assert_eq!(doc.info.date.as_deref(), Some("2023"));
    assert_eq!(doc.questions.len(), 1);
}

#[tokio::test]
async fn test_load_document_withNonObjectQuestion_shouldDropOnlyThatItem() {
    let loader = ExamLoader::new(loosely_typed_source(), "index.json");

    let questions = loader.exam_questions("b.json").await;

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["q"], "2");
}

#[tokio::test]
async fn test_load_document_withNullInfo_shouldUseEmptyInfo() {
    let loader = ExamLoader::new(loosely_typed_source(), "index.json");

    let doc = loader.load_document("d.json").await.expect("exam with null info should load");

    assert_eq!(doc.info.title, None);
    assert_eq!(doc.questions.len(), 1);
}

#[tokio::test]
async fn test_aggregation_withLooselyTypedExams_shouldKeepEveryExam() {
    let loader = ExamLoader::new(loosely_typed_source(), "index.json");

    let summaries = loader.exam_summaries().await;
    let bank = loader.vocab_bank().await;

    let paths: Vec<&str> = summaries.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(paths, vec!["a.json", "b.json", "c.json", "d.json"]);
    assert_eq!(
        serde_json::to_value(&bank).unwrap(),
        json!([
            { "q": "1", "source_exam": "Exam A" },
            { "q": "2", "source_exam": "Exam B" },
            { "q": "3", "source_exam": "Exam C" },
            { "q": "4", "source_exam": "" },
        ])
    );
}

#[tokio::test]
async fn test_exam_summaries_withShadowingInfoFields_shouldKeepOriginatingPath() {
    let source = MockSource::new()
        .with_asset("index.json", r#"["c.json"]"#)
        .with_asset(
            "c.json",
            r#"{"info":{"title":"Exam C","path":"x","question_count":9},"questions":[{"q":"3"}]}"#,
        );
    let loader = ExamLoader::new(source, "index.json");

    let summaries = loader.exam_summaries().await;

    assert_eq!(
        serde_json::to_string(&summaries).unwrap(),
        r#"[{"path":"c.json","title":"Exam C","question_count":1}]"#
    );
}
