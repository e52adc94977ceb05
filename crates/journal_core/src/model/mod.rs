//! Domain model for journal entries.
//!
//! # Responsibility
//! - Define the canonical persisted record and its input validation.
//!
//! # Invariants
//! - Every entry is identified by a stable, store-assigned integer id.
//! - Deletion is permanent row removal; there are no tombstones.

pub mod entry;
