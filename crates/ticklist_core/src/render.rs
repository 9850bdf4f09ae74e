//! Plain-text projection of the task list.
//!
//! The renderer rebuilds the whole view from `&[Task]` on every call — there
//! is no incremental update path, and nothing here mutates state.

use crate::model::task::Task;
use crate::progress::{overall_progress, task_progress, ProgressBand};

const ANSI_RESET: &str = "\x1b[0m";
const SUBTASK_INDENT: &str = "      ";

/// Options controlling renderer output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit ANSI color on progress bar fills.
    pub color: bool,
    /// Character width of each progress bar.
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            bar_width: 20,
        }
    }
}

/// Renders the complete task list: overall progress header, one line per
/// task, and indented subtask lines for expanded tasks.
pub fn render_task_list(tasks: &[Task], opts: &RenderOptions) -> String {
    let mut out = String::new();
    let overall = overall_progress(tasks);
    out.push_str(&format!(
        "Overall {} {:>3}%\n",
        render_bar(overall, opts),
        overall
    ));

    if tasks.is_empty() {
        out.push_str("No tasks yet.\n");
        return out;
    }

    for task in tasks {
        let percent = task_progress(task);
        let mut line = format!(
            "{} {:>3}. {} {} {:>3}%",
            checkbox(task.completed),
            task.id,
            capitalize_first(&task.title),
            render_bar(percent, opts),
            percent
        );
        if task.has_subtasks() {
            line.push(' ');
            line.push_str(if task.expanded { "[-]" } else { "[+]" });
        }
        line.push('\n');
        out.push_str(&line);

        if task.expanded {
            for subtask in &task.subtasks {
                out.push_str(&format!(
                    "{}{} {:>3}. {}\n",
                    SUBTASK_INDENT,
                    checkbox(subtask.completed),
                    subtask.id,
                    capitalize_first(&subtask.title)
                ));
            }
        }
    }

    out
}

/// Uppercases the first character for display unless it already is
/// uppercase. The stored title is never modified.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if first.is_uppercase() => value.to_string(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_bar(percent: u8, opts: &RenderOptions) -> String {
    let width = opts.bar_width.max(1);
    let filled = (usize::from(percent) * width + 50) / 100;
    let fill = "#".repeat(filled);
    let rest = "-".repeat(width - filled);
    if opts.color {
        let color = band_color(ProgressBand::for_percent(percent));
        format!("[{color}{fill}{ANSI_RESET}{rest}]")
    } else {
        format!("[{fill}{rest}]")
    }
}

fn band_color(band: ProgressBand) -> &'static str {
    match band {
        ProgressBand::Empty => "\x1b[90m",
        ProgressBand::Low => "\x1b[33m",
        ProgressBand::Mid => "\x1b[38;5;208m",
        ProgressBand::High => "\x1b[38;5;202m",
        ProgressBand::Full => "\x1b[32m",
    }
}
