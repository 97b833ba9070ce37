// TaskTracker - Session-scoped in-memory task list with filtered views

pub mod filter;
pub mod models;
pub mod store;

// Re-export main types for convenience
pub use filter::Filter;
pub use models::{Counts, Task, now_ms};
pub use store::TaskStore;
