/*!
 * Session flags and page navigation.
 *
 * This module provides:
 * - Key-value stores standing in for browser local storage
 * - The three session flags and their typed view
 * - The navigator that sets the flags and names the next page
 */

pub mod navigator;
pub mod state;
pub mod store;

// Re-export main types
pub use navigator::{Page, Redirect, SessionNavigator};
pub use state::{AppMode, SessionState};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
