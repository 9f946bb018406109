//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `categories` table.
//! - Resolve category titles to ids for the task store.
//!
//! # Invariants
//! - Titles are validated and trimmed before insert.
//! - Lookups match the exact title first, then the trimmed one, so rows
//!   written untrimmed by older builds stay reachable.
//! - Deleting a category relies on `ON DELETE CASCADE` to drop its tasks.

use crate::model::category::{Category, CategoryId};
use crate::model::normalize_title;
use crate::repo::{ensure_connection_ready, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Picks one row by `?1` (as given) or `?2` (trimmed), preferring `?1`.
pub(crate) const TITLE_MATCH_SQL: &str = "WHERE title = ?1 OR title = ?2
    ORDER BY title = ?1 DESC
    LIMIT 1";

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Lists categories in storage order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Inserts one category; fails with `DuplicateTitle` on a taken title.
    fn create_category(&self, title: &str) -> RepoResult<Category>;
    /// Looks up one category by exact title.
    fn find_category(&self, title: &str) -> RepoResult<Option<Category>>;
    /// Deletes by title and returns affected rows (0 when absent).
    fn delete_category(&self, title: &str) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn create_category(&self, title: &str) -> RepoResult<Category> {
        let title = normalize_title(title)?;

        self.conn
            .execute("INSERT INTO categories (title) VALUES (?1);", [title])
            .map_err(|err| RepoError::from_insert(err, Entity::Category, title))?;

        Ok(Category {
            id: CategoryId(self.conn.last_insert_rowid()),
            title: title.to_string(),
        })
    }

    fn find_category(&self, title: &str) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                &format!("SELECT id, title FROM categories {TITLE_MATCH_SQL};"),
                params![title, title.trim()],
                parse_category_row,
            )
            .optional()?;
        Ok(category)
    }

    fn delete_category(&self, title: &str) -> RepoResult<usize> {
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM categories
                 WHERE id = (SELECT id FROM categories {TITLE_MATCH_SQL});"
            ),
            params![title, title.trim()],
        )?;
        Ok(changed)
    }
}

/// Resolves a category title to its id inside the caller's connection or
/// transaction. Blank titles are a validation error, unknown ones `NotFound`.
pub(crate) fn resolve_category_id(conn: &Connection, title: &str) -> RepoResult<CategoryId> {
    let trimmed = normalize_title(title)?;
    conn.query_row(
        &format!("SELECT id FROM categories {TITLE_MATCH_SQL};"),
        params![title, trimmed],
        |row| row.get::<_, i64>(0),
    )
    .optional()?
    .map(CategoryId)
    .ok_or_else(|| RepoError::not_found(Entity::Category, title))
}

// Blank titles written by older builds are passed through untouched.
fn parse_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: CategoryId(row.get("id")?),
        title: row.get("title")?,
    })
}
