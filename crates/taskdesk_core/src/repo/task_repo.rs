//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `tasks` table, joined with `categories` for display.
//! - Resolve category titles before filtering or inserting.
//!
//! # Invariants
//! - New tasks start as `TaskState::Pending`.
//! - Category resolution and insert run in one transaction.
//! - `done` is persisted as 0/1; any other stored value is rejected on read.
//! - Title lookups prefer the exact title and fall back to the trimmed one.

use crate::model::category::CategoryId;
use crate::model::normalize_title;
use crate::model::task::{NewTask, TaskDetail, TaskId, TaskState, TaskSummary};
use crate::repo::category_repo::{resolve_category_id, TITLE_MATCH_SQL};
use crate::repo::{bool_to_int, ensure_connection_ready, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

/// Query options for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Restrict to one category title. `None` or a blank value lists all.
    pub category: Option<String>,
}

impl TaskListQuery {
    pub fn in_category(title: impl Into<String>) -> Self {
        Self {
            category: Some(title.into()),
        }
    }

    fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|title| !title.trim().is_empty())
    }
}

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Lists `(title, state)` rows, optionally filtered by category title.
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskSummary>>;
    /// Inserts one pending task under an existing category.
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    /// Reads one task with its owning category title.
    fn get_task_detail(&self, title: &str) -> RepoResult<Option<TaskDetail>>;
    /// Overwrites the done flag of one task.
    fn set_task_done(&self, title: &str, state: TaskState) -> RepoResult<()>;
    /// Resolves a task title to its id.
    fn find_task_id(&self, title: &str) -> RepoResult<Option<TaskId>>;
    /// Hard-deletes one task by id.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskSummary>> {
        let category_id = match query.category_filter() {
            Some(title) => Some(resolve_category_id(self.conn, title)?),
            None => None,
        };

        let mut stmt = self.conn.prepare(
            "SELECT title, done
             FROM tasks
             WHERE (?1 IS NULL OR category_id = ?1)
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([category_id.map(|CategoryId(id)| id)])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(TaskSummary {
                title: row.get("title")?,
                state: parse_done(row)?,
            });
        }
        Ok(tasks)
    }

    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        let title = normalize_title(&task.title)?;

        // Rolled back on drop if any step below fails.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let CategoryId(category_id) = resolve_category_id(&tx, &task.category)?;
        tx.execute(
            "INSERT INTO tasks (title, description, done, category_id)
             VALUES (?1, ?2, 0, ?3);",
            params![title, task.description.as_str(), category_id],
        )
        .map_err(|err| RepoError::from_insert(err, Entity::Task, title))?;
        let id = TaskId(tx.last_insert_rowid());
        tx.commit()?;

        Ok(id)
    }

    fn get_task_detail(&self, title: &str) -> RepoResult<Option<TaskDetail>> {
        let Some(TaskId(id)) = self.find_task_id(title)? else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT
                tasks.id AS id,
                tasks.title AS title,
                tasks.description AS description,
                tasks.done AS done,
                categories.title AS category
             FROM tasks
             JOIN categories ON tasks.category_id = categories.id
             WHERE tasks.id = ?1;",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(TaskDetail {
                id: TaskId(row.get("id")?),
                title: row.get("title")?,
                description: row.get("description")?,
                state: parse_done(row)?,
                category: row.get("category")?,
            }));
        }

        Ok(None)
    }

    fn set_task_done(&self, title: &str, state: TaskState) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE tasks SET done = ?3
                 WHERE id = (SELECT id FROM tasks {TITLE_MATCH_SQL});"
            ),
            params![title, title.trim(), bool_to_int(state.is_done())],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(Entity::Task, title));
        }

        Ok(())
    }

    fn find_task_id(&self, title: &str) -> RepoResult<Option<TaskId>> {
        let id = self
            .conn
            .query_row(
                &format!("SELECT id FROM tasks {TITLE_MATCH_SQL};"),
                params![title, title.trim()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(id.map(TaskId))
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.0])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Task,
                title: format!("#{id}"),
            });
        }

        Ok(())
    }
}

fn parse_done(row: &Row<'_>) -> RepoResult<TaskState> {
    match row.get::<_, i64>("done")? {
        0 => Ok(TaskState::Pending),
        1 => Ok(TaskState::Done),
        other => Err(RepoError::InvalidData(format!(
            "invalid done value `{other}` in tasks.done"
        ))),
    }
}
