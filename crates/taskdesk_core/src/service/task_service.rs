//! Task use-case service.
//!
//! # Invariants
//! - Detail reads and done writes are separate calls; callers compose them.
//! - Missing tasks surface as `RepoError::NotFound`, never as `None`.

use crate::model::task::{NewTask, TaskDetail, TaskId, TaskState, TaskSummary};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::{Entity, RepoError, RepoResult};

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists tasks, optionally restricted to one category title.
    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskSummary>> {
        self.repo.list_tasks(query)
    }

    /// Creates a pending task under an existing category.
    pub fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        self.repo.create_task(task)
    }

    /// Reads title, description, state and category of one task.
    pub fn get_task_detail(&self, title: &str) -> RepoResult<TaskDetail> {
        self.repo
            .get_task_detail(title)?
            .ok_or_else(|| RepoError::not_found(Entity::Task, title))
    }

    /// Persists the done flag of one task.
    pub fn set_task_done(&self, title: &str, done: bool) -> RepoResult<()> {
        self.repo.set_task_done(title, TaskState::from(done))
    }

    /// Resolves a task title to its id, failing with `NotFound`.
    pub fn resolve_task(&self, title: &str) -> RepoResult<TaskId> {
        self.repo
            .find_task_id(title)?
            .ok_or_else(|| RepoError::not_found(Entity::Task, title))
    }

    /// Deletes a task previously resolved with [`Self::resolve_task`].
    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)
    }
}
