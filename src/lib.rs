/*!
 * # Job Vocab BD
 *
 * A Rust library for practicing job-exam vocabulary from static JSON exam files.
 *
 * ## Features
 *
 * - Fetch an exam index and every exam document it lists, concurrently
 * - Read exams from a static website or a local directory
 * - Build the exam dashboard and a merged vocab bank tagged by source exam
 * - Skip exams that fail to load instead of aborting
 * - Keep session flags between runs in a local key-value store
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `source`: Asset transports:
 *   - `source::http`: Static site client
 *   - `source::directory`: Local directory reader
 * - `exam`: Exam data, loading and aggregation:
 *   - `exam::loader`: Fail-soft index and document fetching
 *   - `exam::aggregator`: Dashboard summaries and vocab bank
 * - `session`: Session flags, key-value stores and page navigation
 * - `app_controller`: Page controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod exam;
pub mod session;
pub mod source;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PageView};
pub use errors::{AppError, FetchError, SessionError};
pub use exam::{ExamDocument, ExamLoader, ExamSummary, VocabEntry};
pub use session::{AppMode, Page, Redirect, SessionNavigator, SessionState};
