// Data models for the task list

use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// `id` is assigned once at creation and never reused within a session.
/// `text` is always non-empty and trimmed; `created_at` is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: i64,
}

/// Tallies over the full task list
///
/// Invariant: `total == completed + active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}
