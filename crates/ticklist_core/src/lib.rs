//! Core domain logic for Ticklist.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod progress;
pub mod render;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{TaskList, TaskListError};
pub use model::task::{Subtask, SubtaskId, Task, TaskId};
pub use progress::{overall_progress, subtask_progress, task_progress, ProgressBand};
pub use render::{capitalize_first, render_task_list, RenderOptions};
pub use repo::snapshot_repo::{
    SnapshotError, SnapshotRepository, SnapshotResult, SqliteSnapshotRepository, SNAPSHOT_KEY,
};
pub use service::list_service::{TaskListService, TaskServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
