//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the canonical entry record returned by every read path.
//! - Validate caller input before it reaches SQL mutations.
//!
//! # Invariants
//! - `id` is assigned once by storage and never changes or gets reused.
//! - `created_at` is immutable after creation.
//! - `updated_at >= created_at` at all times.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Values are monotonically increasing and never reused, even after the
/// row they named is deleted.
pub type EntryId = i64;

/// Canonical persisted journal entry.
///
/// `title` length limits are enforced by the caller-facing form layer;
/// the store persists whatever it receives without truncation. `content`
/// may carry markup and has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned stable id.
    pub id: EntryId,
    /// Non-empty display title.
    pub title: String,
    /// Non-empty body text, possibly markup-bearing.
    pub content: String,
    /// Creation time in epoch milliseconds. Set once, never refreshed.
    pub created_at: i64,
    /// Last-write time in epoch milliseconds. Refreshed on every update.
    pub updated_at: i64,
}

impl Entry {
    /// Returns whether stored timestamps satisfy the row invariant.
    ///
    /// Read paths use this to reject corrupted persisted state instead of
    /// masking it.
    pub fn timestamps_consistent(&self) -> bool {
        self.updated_at >= self.created_at
    }
}

/// Rejected entry input. Upstream form layers normally catch these; the
/// store re-checks so garbage never reaches a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "entry title must not be empty"),
            Self::EmptyContent => write!(f, "entry content must not be empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// Validates create/update input before any SQL mutation.
///
/// Whitespace-only values count as empty. Values are persisted exactly as
/// given; validation never trims or rewrites them.
pub fn validate_entry_input(title: &str, content: &str) -> Result<(), EntryValidationError> {
    if title.trim().is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(EntryValidationError::EmptyContent);
    }
    Ok(())
}
