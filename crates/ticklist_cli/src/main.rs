//! Interactive Ticklist surface.
//!
//! # Responsibility
//! - Wire user actions to the core crate: read a command, dispatch to the
//!   service, print a notice on rejection, re-render the full list.
//! - Own process concerns: argument parsing, data directory layout,
//!   logging init, exit codes.

use clap::Parser;
use log::info;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use ticklist_core::db::{open_db, open_db_in_memory};
use ticklist_core::{
    default_log_level, init_logging, render_task_list, RenderOptions, SnapshotRepository,
    SqliteSnapshotRepository, SubtaskId, TaskId, TaskListService, TaskServiceError,
};

const DB_FILE_NAME: &str = "ticklist.db";
const LOG_DIR_NAME: &str = "logs";

const HELP_TEXT: &str = "\
commands:
  add <title>                 add a task
  sub <task-id> <title>       add a subtask under a task
  tick <task-id>              toggle a task's completion
  tick <task-id> <subtask-id> toggle a subtask (rolls up to the task)
  del <task-id>               delete a task
  del <task-id> <subtask-id>  delete a subtask
  fold <task-id>              expand/collapse a task's subtasks
  list                        re-render the list
  help                        show this help
  quit                        exit";

/// Local-first task list with subtask rollup and progress bars.
#[derive(Parser)]
#[command(name = "ticklist", version, about)]
struct Cli {
    /// Directory holding the database and log files.
    #[arg(long, value_name = "DIR", default_value = ".ticklist")]
    data_dir: PathBuf,
    /// Keep state in memory only; nothing survives exit.
    #[arg(long)]
    in_memory: bool,
    /// Disable ANSI color in progress bars.
    #[arg(long)]
    no_color: bool,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Add {
        title: String,
    },
    AddSubtask {
        task_id: TaskId,
        title: String,
    },
    Toggle {
        task_id: TaskId,
        subtask_id: Option<SubtaskId>,
    },
    Delete {
        task_id: TaskId,
        subtask_id: Option<SubtaskId>,
    },
    Fold {
        task_id: TaskId,
    },
    List,
    Help,
    Quit,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let data_dir = absolutize(&cli.data_dir)?;
    std::fs::create_dir_all(&data_dir)
        .map_err(|err| format!("cannot create data dir `{}`: {err}", data_dir.display()))?;

    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = data_dir.join(LOG_DIR_NAME);
    let log_dir = log_dir
        .to_str()
        .ok_or("data dir path is not valid UTF-8")?;
    if let Err(message) = init_logging(&level, log_dir) {
        eprintln!("warning: file logging disabled: {message}");
    }

    let conn = if cli.in_memory {
        open_db_in_memory()?
    } else {
        open_db(data_dir.join(DB_FILE_NAME))?
    };
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let mut service = TaskListService::load(repo)?;
    info!(
        "event=cli_start module=cli status=ok in_memory={} task_count={}",
        cli.in_memory,
        service.tasks().len()
    );

    let opts = RenderOptions {
        color: !cli.no_color,
        ..RenderOptions::default()
    };
    print!("{}", render_task_list(service.tasks(), &opts));
    repl(&mut service, &opts)
}

fn repl<R: SnapshotRepository>(
    service: &mut TaskListService<R>,
    opts: &RenderOptions,
) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if lines.read_line(&mut line)? == 0 {
            // EOF ends the session like `quit`.
            println!();
            return Ok(());
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match parse_command(input) {
            Ok(command) => command,
            Err(notice) => {
                println!("{notice}");
                continue;
            }
        };

        match command {
            ReplCommand::Quit => return Ok(()),
            ReplCommand::Help => println!("{HELP_TEXT}"),
            ReplCommand::List => print!("{}", render_task_list(service.tasks(), opts)),
            command => match dispatch(service, command) {
                Ok(()) => print!("{}", render_task_list(service.tasks(), opts)),
                Err(TaskServiceError::Store(err)) => println!("{err}"),
                Err(err @ TaskServiceError::Snapshot(_)) => {
                    // The in-memory change survives a failed save; show it
                    // and let the next successful save converge storage.
                    println!("warning: {err}");
                    print!("{}", render_task_list(service.tasks(), opts));
                }
            },
        }
    }
}

fn dispatch<R: SnapshotRepository>(
    service: &mut TaskListService<R>,
    command: ReplCommand,
) -> Result<(), TaskServiceError> {
    match command {
        ReplCommand::Add { title } => service.add_task(title).map(|_| ()),
        ReplCommand::AddSubtask { task_id, title } => {
            service.add_subtask(task_id, title).map(|_| ())
        }
        ReplCommand::Toggle {
            task_id,
            subtask_id: Some(subtask_id),
        } => service.toggle_subtask(task_id, subtask_id).map(|_| ()),
        ReplCommand::Toggle {
            task_id,
            subtask_id: None,
        } => service.toggle_task(task_id).map(|_| ()),
        ReplCommand::Delete {
            task_id,
            subtask_id: Some(subtask_id),
        } => service.delete_subtask(task_id, subtask_id),
        ReplCommand::Delete {
            task_id,
            subtask_id: None,
        } => service.delete_task(task_id),
        ReplCommand::Fold { task_id } => service.toggle_expanded(task_id).map(|_| ()),
        // Handled by the repl loop before dispatch.
        ReplCommand::List | ReplCommand::Help | ReplCommand::Quit => Ok(()),
    }
}

/// Parses one non-empty input line into a command.
///
/// Titles keep their inner whitespace; ids are decimal integers. The error
/// string is the notice shown to the user.
fn parse_command(input: &str) -> Result<ReplCommand, String> {
    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (input, ""),
    };

    match keyword {
        "add" => {
            if rest.is_empty() {
                return Err("usage: add <title>".to_string());
            }
            Ok(ReplCommand::Add {
                title: rest.to_string(),
            })
        }
        "sub" => {
            let (task_id, title) = split_id_and_title(rest, "usage: sub <task-id> <title>")?;
            Ok(ReplCommand::AddSubtask { task_id, title })
        }
        "tick" => {
            let (task_id, subtask_id) = parse_id_pair(rest, "usage: tick <task-id> [subtask-id]")?;
            Ok(ReplCommand::Toggle {
                task_id,
                subtask_id,
            })
        }
        "del" => {
            let (task_id, subtask_id) = parse_id_pair(rest, "usage: del <task-id> [subtask-id]")?;
            Ok(ReplCommand::Delete {
                task_id,
                subtask_id,
            })
        }
        "fold" => {
            let task_id = parse_id(rest).ok_or_else(|| "usage: fold <task-id>".to_string())?;
            Ok(ReplCommand::Fold { task_id })
        }
        "list" => Ok(ReplCommand::List),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn split_id_and_title(rest: &str, usage: &str) -> Result<(u64, String), String> {
    let (id_token, title) = rest
        .split_once(char::is_whitespace)
        .map(|(id, title)| (id, title.trim()))
        .ok_or_else(|| usage.to_string())?;
    let id = parse_id(id_token).ok_or_else(|| usage.to_string())?;
    if title.is_empty() {
        return Err(usage.to_string());
    }
    Ok((id, title.to_string()))
}

fn parse_id_pair(rest: &str, usage: &str) -> Result<(u64, Option<u64>), String> {
    let mut tokens = rest.split_whitespace();
    let first = tokens.next().and_then(parse_id);
    let second = tokens.next();
    if tokens.next().is_some() {
        return Err(usage.to_string());
    }
    match (first, second) {
        (Some(task_id), None) => Ok((task_id, None)),
        (Some(task_id), Some(token)) => {
            let subtask_id = parse_id(token).ok_or_else(|| usage.to_string())?;
            Ok((task_id, Some(subtask_id)))
        }
        _ => Err(usage.to_string()),
    }
}

fn parse_id(token: &str) -> Option<u64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse().ok()
}

fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve current directory: {err}"))?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, ReplCommand};

    #[test]
    fn add_keeps_the_whole_title() {
        assert_eq!(
            parse_command("add buy milk at the corner shop").unwrap(),
            ReplCommand::Add {
                title: "buy milk at the corner shop".to_string()
            }
        );
    }

    #[test]
    fn add_without_title_reports_usage() {
        let notice = parse_command("add").unwrap_err();
        assert!(notice.contains("usage"));
    }

    #[test]
    fn sub_takes_a_task_id_then_a_title() {
        assert_eq!(
            parse_command("sub 3 2% milk").unwrap(),
            ReplCommand::AddSubtask {
                task_id: 3,
                title: "2% milk".to_string()
            }
        );
        assert!(parse_command("sub milk").is_err());
        assert!(parse_command("sub 3").is_err());
    }

    #[test]
    fn tick_accepts_one_or_two_ids() {
        assert_eq!(
            parse_command("tick 7").unwrap(),
            ReplCommand::Toggle {
                task_id: 7,
                subtask_id: None
            }
        );
        assert_eq!(
            parse_command("tick 7 12").unwrap(),
            ReplCommand::Toggle {
                task_id: 7,
                subtask_id: Some(12)
            }
        );
        assert!(parse_command("tick").is_err());
        assert!(parse_command("tick seven").is_err());
        assert!(parse_command("tick 1 2 3").is_err());
    }

    #[test]
    fn del_mirrors_the_tick_grammar() {
        assert_eq!(
            parse_command("del 2").unwrap(),
            ReplCommand::Delete {
                task_id: 2,
                subtask_id: None
            }
        );
        assert_eq!(
            parse_command("del 2 5").unwrap(),
            ReplCommand::Delete {
                task_id: 2,
                subtask_id: Some(5)
            }
        );
    }

    #[test]
    fn fold_list_help_quit_parse() {
        assert_eq!(
            parse_command("fold 4").unwrap(),
            ReplCommand::Fold { task_id: 4 }
        );
        assert_eq!(parse_command("list").unwrap(), ReplCommand::List);
        assert_eq!(parse_command("help").unwrap(), ReplCommand::Help);
        assert_eq!(parse_command("?").unwrap(), ReplCommand::Help);
        assert_eq!(parse_command("quit").unwrap(), ReplCommand::Quit);
        assert_eq!(parse_command("q").unwrap(), ReplCommand::Quit);
    }

    #[test]
    fn unknown_keyword_points_at_help() {
        let notice = parse_command("frobnicate 1").unwrap_err();
        assert!(notice.contains("help"));
    }
}
