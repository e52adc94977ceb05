//! Entry store service.
//!
//! # Responsibility
//! - Provide the caller-facing create/get/update/delete/count/list API.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Every operation requires an [`AccessGrant`] issued by the embedding
//!   gate; the store never consults process-wide authorization state.
//! - Service APIs never bypass repository validation contracts.
//! - Reads always round-trip to storage; there is no caching layer.

use crate::access::AccessGrant;
use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::{
    normalize_page_value, EntryListQuery, EntryPage, EntryRepository, RepoError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for entry store use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent entry state: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Caller-facing store facade over repository implementations.
///
/// Grants are accepted and discarded; their presence in the signature is
/// the authorization contract.
pub struct EntryStore<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryStore<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one entry and returns the fully populated record.
    ///
    /// # Contract
    /// - `created_at == updated_at` on the returned record.
    pub fn create_entry(
        &self,
        _grant: &AccessGrant,
        title: &str,
        content: &str,
    ) -> Result<Entry, StoreError> {
        let id = self.repo.create_entry(title, content)?;
        let entry = self
            .repo
            .get_entry(id)?
            .ok_or(StoreError::InconsistentState(
                "created entry not found in read-back",
            ))?;

        info!("event=entry_create module=store status=ok id={id}");
        Ok(entry)
    }

    /// Gets one entry by stable id; `None` is the not-found outcome.
    pub fn get_entry(&self, _grant: &AccessGrant, id: EntryId) -> Result<Option<Entry>, StoreError> {
        Ok(self.repo.get_entry(id)?)
    }

    /// Replaces title and content wholesale and returns the refreshed
    /// record. `created_at` is never touched.
    pub fn update_entry(
        &self,
        _grant: &AccessGrant,
        id: EntryId,
        title: &str,
        content: &str,
    ) -> Result<Entry, StoreError> {
        self.repo.update_entry(id, title, content)?;
        let entry = self
            .repo
            .get_entry(id)?
            .ok_or(StoreError::InconsistentState(
                "updated entry not found in read-back",
            ))?;

        info!("event=entry_update module=store status=ok id={id}");
        Ok(entry)
    }

    /// Permanently deletes one entry by stable id.
    pub fn delete_entry(&self, _grant: &AccessGrant, id: EntryId) -> Result<(), StoreError> {
        self.repo.delete_entry(id)?;
        info!("event=entry_delete module=store status=ok id={id}");
        Ok(())
    }

    /// Total number of stored entries, independent of any filter.
    pub fn count_entries(&self, _grant: &AccessGrant) -> Result<u64, StoreError> {
        Ok(self.repo.count_entries()?)
    }

    /// Lists entries using optional substring search and pagination.
    ///
    /// A page beyond the available data yields empty items with the
    /// filter-wide `total_matching` intact.
    pub fn list_entries(
        &self,
        _grant: &AccessGrant,
        search: Option<String>,
        page: u32,
        page_size: u32,
    ) -> Result<EntryPage, StoreError> {
        let query = EntryListQuery {
            search,
            page: normalize_page_value(page),
            page_size: normalize_page_value(page_size),
        };
        Ok(self.repo.list_entries(&query)?)
    }
}
