//! Task list use-case service.
//!
//! # Responsibility
//! - Load the persisted snapshot into the in-memory store at startup.
//! - Mirror every successful mutation back to the snapshot store in the
//!   same turn (full re-serialization, synchronous).
//!
//! # Invariants
//! - A malformed snapshot is treated as absent state: the service starts
//!   with an empty list and logs a warning instead of failing startup.
//! - Store rejections (blank title, unknown id) persist nothing.
//! - A failed save keeps the in-memory mutation; the next successful save
//!   re-serializes the whole list, so visible and persisted state converge.

use crate::model::list::{TaskList, TaskListError};
use crate::model::task::{SubtaskId, Task, TaskId};
use crate::repo::snapshot_repo::{SnapshotError, SnapshotRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced by the task list service.
#[derive(Debug)]
pub enum TaskServiceError {
    /// The store rejected the mutation; nothing changed or was persisted.
    Store(TaskListError),
    /// Snapshot persistence failed.
    Snapshot(SnapshotError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<TaskListError> for TaskServiceError {
    fn from(value: TaskListError) -> Self {
        Self::Store(value)
    }
}

impl From<SnapshotError> for TaskServiceError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Mutate-then-persist facade over the task store.
///
/// Constructed once at startup with an injected repository; the renderer
/// reads `tasks()` after each operation.
pub struct TaskListService<R: SnapshotRepository> {
    list: TaskList,
    repo: R,
}

impl<R: SnapshotRepository> TaskListService<R> {
    /// Loads the persisted snapshot and builds the service around it.
    ///
    /// # Contract
    /// - Absent snapshot: starts with an empty list.
    /// - Malformed snapshot: starts with an empty list and logs a warning.
    /// - DB transport errors propagate.
    pub fn load(repo: R) -> Result<Self, TaskServiceError> {
        let list = match repo.load() {
            Ok(Some(tasks)) => {
                info!(
                    "event=snapshot_load module=service status=ok task_count={}",
                    tasks.len()
                );
                TaskList::from_tasks(tasks)
            }
            Ok(None) => {
                info!("event=snapshot_load module=service status=ok task_count=0 empty=true");
                TaskList::new()
            }
            Err(SnapshotError::InvalidSnapshot(message)) => {
                warn!(
                    "event=snapshot_load module=service status=warn error_code=invalid_snapshot error={message}"
                );
                TaskList::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { list, repo })
    }

    /// Read access for the renderer.
    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    /// Appends a new task and persists the updated list.
    pub fn add_task(&mut self, title: impl Into<String>) -> Result<TaskId, TaskServiceError> {
        let id = self.list.add_task(title)?;
        self.persist()?;
        Ok(id)
    }

    /// Appends a new subtask and persists the updated list.
    pub fn add_subtask(
        &mut self,
        task_id: TaskId,
        title: impl Into<String>,
    ) -> Result<SubtaskId, TaskServiceError> {
        let id = self.list.add_subtask(task_id, title)?;
        self.persist()?;
        Ok(id)
    }

    /// Flips a task's completion flag and persists; returns the new value.
    pub fn toggle_task(&mut self, task_id: TaskId) -> Result<bool, TaskServiceError> {
        let completed = self.list.toggle_task(task_id)?;
        self.persist()?;
        Ok(completed)
    }

    /// Flips a subtask's completion flag, re-derives the parent flag, and
    /// persists; returns the subtask's new value.
    pub fn toggle_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> Result<bool, TaskServiceError> {
        let completed = self.list.toggle_subtask(task_id, subtask_id)?;
        self.persist()?;
        Ok(completed)
    }

    /// Removes a task and persists the updated list.
    pub fn delete_task(&mut self, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.list.delete_task(task_id)?;
        self.persist()
    }

    /// Removes a subtask and persists the updated list.
    pub fn delete_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> Result<(), TaskServiceError> {
        self.list.delete_subtask(task_id, subtask_id)?;
        self.persist()
    }

    /// Flips the subtask-visibility flag and persists; returns the new
    /// value.
    pub fn toggle_expanded(&mut self, task_id: TaskId) -> Result<bool, TaskServiceError> {
        let expanded = self.list.toggle_expanded(task_id)?;
        self.persist()?;
        Ok(expanded)
    }

    fn persist(&self) -> Result<(), TaskServiceError> {
        if let Err(err) = self.repo.save(self.list.tasks()) {
            error!("event=snapshot_save module=service status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }
}
