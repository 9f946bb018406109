//! Category use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::model::category::Category;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for category operations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all categories in insertion order.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    /// Creates one category.
    ///
    /// # Contract
    /// - Blank titles return `RepoError::Validation`.
    /// - Taken titles return `RepoError::DuplicateTitle`.
    pub fn create_category(&self, title: &str) -> RepoResult<Category> {
        self.repo.create_category(title)
    }

    /// Deletes a category and, through cascade, all of its tasks.
    ///
    /// Returns the number of removed categories; absent titles yield `0`.
    pub fn delete_category(&self, title: &str) -> RepoResult<usize> {
        self.repo.delete_category(title)
    }
}
