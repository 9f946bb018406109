//! Core logic for TaskDesk: categories, tasks and the commands over them.
//! This crate is the single source of truth for storage invariants.

pub mod command;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use command::{AssumeYes, Command, CommandError, Confirm, Outcome, TaskBoard};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::task::{NewTask, TaskDetail, TaskId, TaskState, TaskSummary};
pub use model::TitleError;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
