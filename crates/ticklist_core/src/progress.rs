//! Progress aggregation over tasks and subtasks.
//!
//! # Responsibility
//! - Derive integer completion percentages for one task and for the whole
//!   list.
//! - Map percentages onto the five-band display scale.
//!
//! # Invariants
//! - All functions are pure; callers re-run them after every mutation.
//! - Percentages use round-half-up and are `0` for empty input, never NaN
//!   or a division error.
//! - Overall progress aggregates at the subtask level across the whole
//!   list; it is not an average of per-task percentages.

use crate::model::task::{Subtask, Task};

/// Display band for a progress value.
///
/// The renderer decides what each band looks like; the thresholds
/// themselves are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// Exactly 0%.
    Empty,
    /// 1% through 25%.
    Low,
    /// 26% through 50%.
    Mid,
    /// 51% through 75%.
    High,
    /// 76% through 100%.
    Full,
}

impl ProgressBand {
    /// Maps a percentage (0..=100) onto its band.
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            0 => Self::Empty,
            1..=25 => Self::Low,
            26..=50 => Self::Mid,
            51..=75 => Self::High,
            _ => Self::Full,
        }
    }
}

/// Percentage of completed subtasks in one sequence; `0` when empty.
pub fn subtask_progress(subtasks: &[Subtask]) -> u8 {
    let completed = subtasks.iter().filter(|st| st.completed).count();
    rounded_percent(completed, subtasks.len())
}

/// Progress shown on one task's bar.
///
/// A task with subtasks reports its subtask percentage; a task without
/// subtasks reports 100 when completed and 0 otherwise.
pub fn task_progress(task: &Task) -> u8 {
    if task.has_subtasks() {
        subtask_progress(&task.subtasks)
    } else if task.completed {
        100
    } else {
        0
    }
}

/// Completion percentage across all subtasks of all tasks; `0` when the
/// list holds no subtasks at all.
///
/// Tasks without subtasks contribute nothing here, even when completed;
/// only subtasks count.
pub fn overall_progress(tasks: &[Task]) -> u8 {
    let (completed, total) = tasks.iter().fold((0, 0), |(done, all), task| {
        let (task_done, task_all) = task.subtask_counts();
        (done + task_done, all + task_all)
    });
    rounded_percent(completed, total)
}

/// Integer round-half-up of `100 * completed / total`; `0` when `total` is
/// zero.
fn rounded_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u8
}
