//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and list/filter/paginate APIs over the
//!   canonical `entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate input before SQL mutations; a failed write
//!   leaves the table in its pre-operation state.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List ordering is total: `created_at DESC`, ties by `id DESC`.
//!
//! Search matching is case-insensitive for ASCII characters (SQLite
//! `LIKE` semantics); `LIKE` metacharacters in the query are escaped so
//! the filter is plain substring containment.

use crate::db::DbError;
use crate::model::entry::{validate_entry_input, Entry, EntryId, EntryValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    created_at,
    updated_at
FROM entries";

/// Default page size when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} has no migrations applied (expected {expected_version})"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
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

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
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

/// Query options for listing entries.
///
/// `page` and `page_size` are 1-based; zero values are normalized to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListQuery {
    /// Optional substring filter applied to title OR content.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for EntryListQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of list results plus the filter-wide match count.
///
/// `total_matching` counts every row the filter matched, independent of
/// the returned window, so callers can compute page counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPage {
    pub items: Vec<Entry>,
    pub total_matching: u64,
}

/// Repository interface for entry CRUD and query operations.
pub trait EntryRepository {
    /// Inserts one entry with `created_at = updated_at = now` and returns
    /// the store-assigned id.
    fn create_entry(&self, title: &str, content: &str) -> RepoResult<EntryId>;
    /// Exact lookup; `None` is the expected not-found outcome.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Replaces title and content wholesale and refreshes `updated_at`.
    fn update_entry(&self, id: EntryId, title: &str, content: &str) -> RepoResult<()>;
    /// Removes the row permanently.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    /// Total row count, independent of any filter.
    fn count_entries(&self) -> RepoResult<u64>;
    /// Combined filter + order + paginate query.
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<EntryPage>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections without applied migrations or with a schema
    /// that lacks the `entries` table or one of its required columns.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, title: &str, content: &str) -> RepoResult<EntryId> {
        validate_entry_input(title, content)?;

        // 'now' is stable within one statement, so both timestamp columns
        // receive the identical value.
        self.conn.execute(
            "INSERT INTO entries (title, content, created_at, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000), (strftime('%s', 'now') * 1000));",
            params![title, content],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn update_entry(&self, id: EntryId, title: &str, content: &str) -> RepoResult<()> {
        validate_entry_input(title, content)?;

        let changed = self.conn.execute(
            "UPDATE entries
             SET
                title = ?1,
                content = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![title, content, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_entries(&self) -> RepoResult<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<EntryPage> {
        let page = normalize_page_value(query.page);
        let page_size = normalize_page_value(query.page_size);

        let term = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());
        let (filter_sql, filter_values): (&str, Vec<Value>) = match term {
            Some(term) => (
                " WHERE title LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\'",
                vec![Value::Text(like_pattern(term))],
            ),
            None => ("", Vec::new()),
        };

        let total_matching: u64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM entries{filter_sql};"),
            params_from_iter(filter_values.clone()),
            |row| row.get(0),
        )?;

        let mut bind_values = filter_values;
        bind_values.push(Value::Integer(i64::from(page_size)));
        bind_values.push(Value::Integer(i64::from(page - 1) * i64::from(page_size)));

        let sql = format!(
            "{ENTRY_SELECT_SQL}{filter_sql}
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_entry_row(row)?);
        }

        Ok(EntryPage {
            items,
            total_matching,
        })
    }
}

/// Normalizes a 1-based pagination value; zero is treated as 1.
pub fn normalize_page_value(value: u32) -> u32 {
    value.max(1)
}

fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("%{escaped}%")
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let entry = Entry {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    if !entry.timestamps_consistent() {
        return Err(RepoError::InvalidData(format!(
            "entry {} has updated_at earlier than created_at",
            entry.id
        )));
    }

    Ok(entry)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = crate::db::migrations::latest_version();
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "entries")? {
        return Err(RepoError::MissingRequiredTable("entries"));
    }

    for column in ["id", "title", "content", "created_at", "updated_at"] {
        if !table_has_column(conn, "entries", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "entries",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
