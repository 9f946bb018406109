//! Task records and projections.
//!
//! # Invariants
//! - Every task references exactly one existing category.
//! - `done` has two states only; transitions are direct overwrites.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Surrogate key of a `tasks` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Done,
}

impl TaskState {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl From<bool> for TaskState {
    fn from(done: bool) -> Self {
        if done {
            Self::Done
        } else {
            Self::Pending
        }
    }
}

impl Display for TaskState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// List projection: what a task list row shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub title: String,
    pub state: TaskState,
}

/// Detail projection for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetail {
    pub id: TaskId,
    pub title: String,
    /// Nullable in storage; rows written by this crate always carry a value.
    pub description: Option<String>,
    pub state: TaskState,
    /// Title of the owning category.
    pub category: String,
}

/// Create request for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    /// Stored verbatim; an empty string is accepted.
    pub description: String,
    /// Title of an existing category.
    pub category: String,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}
