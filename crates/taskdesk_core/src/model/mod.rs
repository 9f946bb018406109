//! Domain model for categories and tasks.
//!
//! # Responsibility
//! - Define the records exchanged between stores, services and front ends.
//! - Keep title validation in one place.
//!
//! # Invariants
//! - Ids are storage-assigned surrogate keys and never change.
//! - Titles are unique per entity set; uniqueness itself is enforced by
//!   SQLite, not here.

pub mod category;
pub mod task;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for a user-supplied title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// Title is empty or whitespace-only.
    Empty,
}

impl Display for TitleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "title cannot be empty"),
        }
    }
}

impl Error for TitleError {}

/// Validates a title and returns it trimmed.
pub fn normalize_title(raw: &str) -> Result<&str, TitleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    Ok(trimmed)
}
