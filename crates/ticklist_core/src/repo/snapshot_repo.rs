//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the whole task list as one JSON document under a fixed key.
//! - Load it back on startup, distinguishing "absent" from "malformed".
//!
//! # Invariants
//! - The serialized form preserves every model field, including the
//!   UI-only `expanded` flag, so load(save(x)) == x.
//! - Read paths reject invalid persisted state with a typed error instead
//!   of masking it; the policy of falling back to an empty list lives one
//!   layer up, in the service.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::Task;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the serialized task list.
pub const SNAPSHOT_KEY: &str = "tasks";

/// Result type used by snapshot repository operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors from snapshot persistence operations.
#[derive(Debug)]
pub enum SnapshotError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted value does not decode into a valid task list.
    InvalidSnapshot(String),
    /// Task list could not be serialized for storage.
    Serialize(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidSnapshot(message) => {
                write!(f, "invalid persisted snapshot: {message}")
            }
            Self::Serialize(err) => write!(f, "task list cannot be serialized: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "snapshot repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidSnapshot(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for SnapshotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for whole-list snapshot persistence.
pub trait SnapshotRepository {
    /// Loads the persisted task list.
    ///
    /// Returns `Ok(None)` when no snapshot has been written yet and
    /// `Err(InvalidSnapshot)` when one exists but does not decode.
    fn load(&self) -> SnapshotResult<Option<Vec<Task>>>;
    /// Replaces the persisted task list with the given one.
    fn save(&self, tasks: &[Task]) -> SnapshotResult<()>;
}

/// SQLite-backed snapshot repository.
#[derive(Debug)]
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> SnapshotResult<Self> {
        ensure_snapshot_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> SnapshotResult<Option<Vec<Task>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value
                 FROM snapshots
                 WHERE key = ?1;",
                [SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = value else {
            return Ok(None);
        };

        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .map_err(|err| SnapshotError::InvalidSnapshot(format!("not a task list: {err}")))?;
        validate_tasks(&tasks).map_err(SnapshotError::InvalidSnapshot)?;
        Ok(Some(tasks))
    }

    fn save(&self, tasks: &[Task]) -> SnapshotResult<()> {
        let value = serde_json::to_string(tasks).map_err(SnapshotError::Serialize)?;
        self.conn.execute(
            "INSERT INTO snapshots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![SNAPSHOT_KEY, value],
        )?;
        Ok(())
    }
}

/// Structural checks on decoded snapshots.
///
/// The in-memory store cannot produce these violations; they only appear
/// when the persisted value was written or edited by something else.
fn validate_tasks(tasks: &[Task]) -> Result<(), String> {
    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id) {
            return Err(format!("duplicate task id {}", task.id));
        }
        if task.title.trim().is_empty() {
            return Err(format!("blank title on task {}", task.id));
        }
        let mut subtask_ids = HashSet::new();
        for subtask in &task.subtasks {
            if !subtask_ids.insert(subtask.id) {
                return Err(format!(
                    "duplicate subtask id {} under task {}",
                    subtask.id, task.id
                ));
            }
            if subtask.title.trim().is_empty() {
                return Err(format!(
                    "blank title on subtask {} under task {}",
                    subtask.id, task.id
                ));
            }
        }
    }
    Ok(())
}

fn ensure_snapshot_connection_ready(conn: &Connection) -> SnapshotResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(SnapshotError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "snapshots")? {
        return Err(SnapshotError::MissingRequiredTable("snapshots"));
    }

    for column in ["key", "value", "created_at", "updated_at"] {
        if !table_has_column(conn, "snapshots", column)? {
            return Err(SnapshotError::MissingRequiredColumn {
                table: "snapshots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> SnapshotResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> SnapshotResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
