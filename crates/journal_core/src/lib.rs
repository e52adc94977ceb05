//! Core persistence and query layer for the journal store.
//! This crate is the single source of truth for entry lifecycle invariants.

pub mod access;
pub mod db;
pub mod logging;
pub mod model;
pub mod preview;
pub mod repo;
pub mod service;

pub use access::AccessGrant;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{validate_entry_input, Entry, EntryId, EntryValidationError};
pub use preview::format_preview;
pub use repo::entry_repo::{
    EntryListQuery, EntryPage, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::entry_store::{EntryStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
