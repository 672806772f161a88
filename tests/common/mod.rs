/*!
 * Common test utilities for the jobvocab test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, including parent directories
pub fn create_test_file(dir: &Path, relative_path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Exam document with the given title and question prompts
pub fn exam_json(title: &str, date: &str, prompts: &[&str]) -> String {
    let questions: Vec<serde_json::Value> = prompts
        .iter()
        .map(|p| serde_json::json!({ "question": p, "options": ["a", "b", "c", "d"], "answer": "a" }))
        .collect();

    serde_json::json!({
        "info": { "title": title, "date": date, "category": "BCS" },
        "questions": questions,
    })
    .to_string()
}

/// Writes a small exam site: an index with three entries, one of them missing
pub fn create_exam_site(dir: &Path) -> Result<()> {
    create_test_file(
        dir,
        "index.json",
        r#"["data/bcs_44.json", "data/missing.json", "data/bank_2023.json"]"#,
    )?;
    create_test_file(
        dir,
        "data/bcs_44.json",
        &exam_json("44th BCS Preliminary", "2022-05-27", &["Abundant means?", "Synonym of brave"]),
    )?;
    create_test_file(
        dir,
        "data/bank_2023.json",
        &exam_json("Bank Officer 2023", "2023-03-10", &["Antonym of scarce"]),
    )?;
    Ok(())
}

/// Routes library log output through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
