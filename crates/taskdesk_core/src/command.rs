//! Command interface over the category and task stores.
//!
//! # Responsibility
//! - Map each user action to one named [`Command`].
//! - Ask a [`Confirm`] implementation before destructive commands.
//! - Render storage failures as user-facing messages.
//!
//! # Invariants
//! - A declined confirmation performs no write and yields `Outcome::Cancelled`.
//! - A blank category title on create is a no-op, not an error.
//! - Logged dispatch events carry metadata only, never titles or descriptions.

use crate::model::category::Category;
use crate::model::task::{NewTask, TaskDetail, TaskId, TaskState, TaskSummary};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::category_service::CategoryService;
use crate::service::task_service::TaskService;
use log::{error, info};
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListCategories,
    CreateCategory { title: String },
    DeleteCategory { title: String },
    /// `category: None` lists every task.
    ListTasks { category: Option<String> },
    CreateTask(NewTask),
    ShowTask { title: String },
    SetTaskDone { title: String, done: bool },
    DeleteTask { title: String },
}

impl Command {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListCategories => "list_categories",
            Self::CreateCategory { .. } => "create_category",
            Self::DeleteCategory { .. } => "delete_category",
            Self::ListTasks { .. } => "list_tasks",
            Self::CreateTask(_) => "create_task",
            Self::ShowTask { .. } => "show_task",
            Self::SetTaskDone { .. } => "set_task_done",
            Self::DeleteTask { .. } => "delete_task",
        }
    }
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Categories { items: Vec<Category> },
    CategoryCreated { category: Category },
    CategoryDeleted { title: String, removed: usize },
    Tasks { items: Vec<TaskSummary> },
    TaskCreated { id: TaskId, title: String },
    Task { task: TaskDetail },
    TaskStateChanged { title: String, state: TaskState },
    TaskDeleted { title: String },
    /// Input was cancelled or confirmation declined.
    Cancelled,
}

/// Yes/no gate in front of destructive commands.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms everything. Used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Command failure.
#[derive(Debug)]
pub enum CommandError {
    Repo(RepoError),
}

impl CommandError {
    /// Short machine-readable classification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Repo(RepoError::Validation(_)) => "validation",
            Self::Repo(RepoError::DuplicateTitle { .. }) => "duplicate_title",
            Self::Repo(RepoError::NotFound { .. }) => "not_found",
            Self::Repo(_) => "storage",
        }
    }

    /// Whether the failure stems from user input rather than storage.
    pub fn is_user_error(&self) -> bool {
        self.code() != "storage"
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Repo(RepoError::Validation(err)) => format!("Invalid input: {err}."),
            Self::Repo(RepoError::DuplicateTitle { entity, title }) => {
                format!("A {entity} named \"{title}\" already exists.")
            }
            Self::Repo(RepoError::NotFound { entity, title }) => {
                format!("No {entity} named \"{title}\".")
            }
            Self::Repo(err) => format!("Storage error: {err}"),
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Both stores behind one command entry point.
pub struct TaskBoard<C: CategoryRepository, T: TaskRepository> {
    categories: CategoryService<C>,
    tasks: TaskService<T>,
}

impl<'conn> TaskBoard<SqliteCategoryRepository<'conn>, SqliteTaskRepository<'conn>> {
    /// Builds SQLite-backed stores sharing one migrated connection.
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            CategoryService::new(SqliteCategoryRepository::try_new(conn)?),
            TaskService::new(SqliteTaskRepository::try_new(conn)?),
        ))
    }
}

impl<C: CategoryRepository, T: TaskRepository> TaskBoard<C, T> {
    pub fn new(categories: CategoryService<C>, tasks: TaskService<T>) -> Self {
        Self { categories, tasks }
    }

    pub fn categories(&self) -> &CategoryService<C> {
        &self.categories
    }

    pub fn tasks(&self) -> &TaskService<T> {
        &self.tasks
    }

    /// Runs one command and logs its outcome.
    pub fn dispatch(
        &self,
        command: Command,
        confirm: &mut dyn Confirm,
    ) -> Result<Outcome, CommandError> {
        let started_at = Instant::now();
        let name = command.name();

        match self.execute(command, confirm) {
            Ok(outcome) => {
                info!(
                    "event=command_dispatch module=command status=ok command={} cancelled={} duration_ms={}",
                    name,
                    outcome == Outcome::Cancelled,
                    started_at.elapsed().as_millis()
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(
                    "event=command_dispatch module=command status=error command={} duration_ms={} error_code={}",
                    name,
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                Err(err)
            }
        }
    }

    fn execute(
        &self,
        command: Command,
        confirm: &mut dyn Confirm,
    ) -> Result<Outcome, CommandError> {
        let outcome = match command {
            Command::ListCategories => Outcome::Categories {
                items: self.categories.list_categories()?,
            },
            Command::CreateCategory { title } => {
                if title.trim().is_empty() {
                    return Ok(Outcome::Cancelled);
                }
                Outcome::CategoryCreated {
                    category: self.categories.create_category(&title)?,
                }
            }
            Command::DeleteCategory { title } => {
                if !confirm.confirm(&format!("Delete category \"{title}\" and all its tasks?")) {
                    return Ok(Outcome::Cancelled);
                }
                let removed = self.categories.delete_category(&title)?;
                Outcome::CategoryDeleted { title, removed }
            }
            Command::ListTasks { category } => Outcome::Tasks {
                items: self.tasks.list_tasks(&TaskListQuery { category })?,
            },
            Command::CreateTask(task) => {
                let id = self.tasks.create_task(&task)?;
                Outcome::TaskCreated {
                    id,
                    title: task.title.trim().to_string(),
                }
            }
            Command::ShowTask { title } => Outcome::Task {
                task: self.tasks.get_task_detail(&title)?,
            },
            Command::SetTaskDone { title, done } => {
                self.tasks.set_task_done(&title, done)?;
                Outcome::TaskStateChanged {
                    title,
                    state: TaskState::from(done),
                }
            }
            Command::DeleteTask { title } => {
                let id = self.tasks.resolve_task(&title)?;
                if !confirm.confirm(&format!("Delete task \"{title}\"?")) {
                    return Ok(Outcome::Cancelled);
                }
                self.tasks.delete_task(id)?;
                Outcome::TaskDeleted { title }
            }
        };
        Ok(outcome)
    }
}
