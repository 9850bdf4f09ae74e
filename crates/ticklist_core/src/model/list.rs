//! In-memory task store with store-owned id allocation.
//!
//! # Responsibility
//! - Own the ordered task sequence and every mutation on it.
//! - Allocate monotonically increasing ids for tasks and subtasks.
//! - Apply the completion rollup when a subtask is toggled.
//!
//! # Invariants
//! - Every mutation is synchronous and total: bad input leaves the store
//!   untouched and reports a typed error instead of panicking.
//! - Ids are never reused within one store; loading a snapshot resumes the
//!   counter above the largest id seen.
//! - A task with subtasks has `completed == true` iff every subtask is
//!   completed, re-derived on each subtask toggle.

use crate::model::task::{Subtask, SubtaskId, Task, TaskId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from task store mutations.
///
/// None of these is fatal: the store state is unchanged whenever one is
/// returned, so callers can surface the message and carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// Title is blank after trim.
    BlankTitle,
    /// No task carries the requested id.
    TaskNotFound(TaskId),
    /// The task exists but has no subtask with the requested id.
    SubtaskNotFound {
        task_id: TaskId,
        subtask_id: SubtaskId,
    },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::SubtaskNotFound {
                task_id,
                subtask_id,
            } => write!(f, "subtask not found: {subtask_id} under task {task_id}"),
        }
    }
}

impl Error for TaskListError {}

/// Ordered in-memory task store.
///
/// Constructed once at startup and handed to the service layer; the
/// renderer only ever sees `&[Task]` borrowed from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    /// Creates an empty store with the id counter at its starting value.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from snapshot tasks.
    ///
    /// The id counter resumes strictly above the largest task or subtask id
    /// present, so ids stay unique across restarts.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let max_id = tasks
            .iter()
            .flat_map(|task| {
                std::iter::once(task.id).chain(task.subtasks.iter().map(|st| st.id))
            })
            .max();
        Self {
            next_id: max_id.map_or(1, |id| id.saturating_add(1)),
            tasks,
        }
    }

    /// Read access for the renderer and the snapshot adapter.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of top-level tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a new task.
    ///
    /// # Contract
    /// - Title is trimmed; blank titles are rejected with `BlankTitle`.
    /// - The new task starts not completed, with no subtasks, expanded.
    /// - Returns the allocated task id.
    pub fn add_task(&mut self, title: impl Into<String>) -> Result<TaskId, TaskListError> {
        let title = normalize_title(title.into())?;
        let id = self.alloc_id();
        self.tasks.push(Task::new(id, title));
        Ok(id)
    }

    /// Appends a new subtask to the given task.
    ///
    /// # Contract
    /// - Title is trimmed; blank titles are rejected with `BlankTitle`.
    /// - Returns the allocated subtask id.
    pub fn add_subtask(
        &mut self,
        task_id: TaskId,
        title: impl Into<String>,
    ) -> Result<SubtaskId, TaskListError> {
        let title = normalize_title(title.into())?;
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or(TaskListError::TaskNotFound(task_id))?;
        let id = self.alloc_id();
        self.tasks[index].subtasks.push(Subtask::new(id, title));
        Ok(id)
    }

    /// Flips the completion flag on a task and returns the new value.
    ///
    /// The flag flips regardless of subtasks; the rollup only re-derives it
    /// on the next subtask toggle.
    pub fn toggle_task(&mut self, task_id: TaskId) -> Result<bool, TaskListError> {
        let task = self.task_mut(task_id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Flips the completion flag on a subtask, re-derives the parent flag,
    /// and returns the subtask's new value.
    pub fn toggle_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> Result<bool, TaskListError> {
        let task = self.task_mut(task_id)?;
        let subtask = task
            .subtasks
            .iter_mut()
            .find(|st| st.id == subtask_id)
            .ok_or(TaskListError::SubtaskNotFound {
                task_id,
                subtask_id,
            })?;
        subtask.completed = !subtask.completed;
        let toggled = subtask.completed;
        task.completed = task.subtasks.iter().all(|st| st.completed);
        Ok(toggled)
    }

    /// Removes a task and all of its subtasks.
    pub fn delete_task(&mut self, task_id: TaskId) -> Result<(), TaskListError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or(TaskListError::TaskNotFound(task_id))?;
        self.tasks.remove(index);
        Ok(())
    }

    /// Removes a subtask from its parent.
    ///
    /// The parent's completion flag is intentionally left as-is; it
    /// re-derives on the next subtask toggle.
    pub fn delete_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> Result<(), TaskListError> {
        let task = self.task_mut(task_id)?;
        let index = task
            .subtasks
            .iter()
            .position(|st| st.id == subtask_id)
            .ok_or(TaskListError::SubtaskNotFound {
                task_id,
                subtask_id,
            })?;
        task.subtasks.remove(index);
        Ok(())
    }

    /// Flips the subtask-visibility flag and returns the new value.
    pub fn toggle_expanded(&mut self, task_id: TaskId) -> Result<bool, TaskListError> {
        let task = self.task_mut(task_id)?;
        task.expanded = !task.expanded;
        Ok(task.expanded)
    }

    fn task_mut(&mut self, task_id: TaskId) -> Result<&mut Task, TaskListError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or(TaskListError::TaskNotFound(task_id))
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}

fn normalize_title(value: String) -> Result<String, TaskListError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskListError::BlankTitle);
    }
    Ok(trimmed.to_string())
}
