//! Repository layer: contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per store.
//! - Keep SQL inside the persistence boundary.
//! - Translate engine failures into semantic errors (`NotFound`,
//!   `DuplicateTitle`) in addition to DB transport errors.
//!
//! # Invariants
//! - Write paths validate titles before SQL mutations.
//! - Repositories only accept migrated connections with foreign keys enabled.

pub mod category_repo;
pub mod task_repo;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::TitleError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity set a semantic error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Task,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Task => write!(f, "task"),
        }
    }
}

/// Error for category/task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TitleError),
    Db(DbError),
    NotFound {
        entity: Entity,
        title: String,
    },
    DuplicateTitle {
        entity: Entity,
        title: String,
    },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    ForeignKeysDisabled,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, title } => write!(f, "{entity} not found: `{title}`"),
            Self::DuplicateTitle { entity, title } => {
                write!(f, "{entity} with title `{title}` already exists")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::ForeignKeysDisabled => write!(f, "connection has foreign_keys disabled"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TitleError> for RepoError {
    fn from(value: TitleError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub(crate) fn not_found(entity: Entity, title: &str) -> Self {
        Self::NotFound {
            entity,
            title: title.to_string(),
        }
    }

    /// Maps a `UNIQUE` constraint failure on insert to `DuplicateTitle`.
    pub(crate) fn from_insert(err: rusqlite::Error, entity: Entity, title: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _)
                if inner.code == ErrorCode::ConstraintViolation
                    && inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::DuplicateTitle {
                    entity,
                    title: title.to_string(),
                }
            }
            _ => err.into(),
        }
    }
}

const REQUIRED_TABLES: &[&str] = &["categories", "tasks"];

/// Rejects connections that did not go through `db::open_db*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    let foreign_keys: bool = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if !foreign_keys {
        return Err(RepoError::ForeignKeysDisabled);
    }

    Ok(())
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
