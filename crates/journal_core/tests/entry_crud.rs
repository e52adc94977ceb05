use journal_core::db::migrations::latest_version;
use journal_core::db::open_db_in_memory;
use journal_core::{EntryRepository, RepoError, SqliteEntryRepository};
use rusqlite::{params, Connection};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let id = repo.create_entry("First entry", "first body").unwrap();
    assert!(id > 0);

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "First entry");
    assert_eq!(loaded.content, "first body");
    assert!(loaded.created_at > 0);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn get_missing_entry_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    assert!(repo.get_entry(42).unwrap().is_none());
}

#[test]
fn create_assigns_monotonically_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let first = repo.create_entry("a", "body a").unwrap();
    let second = repo.create_entry("b", "body b").unwrap();
    let third = repo.create_entry("c", "body c").unwrap();

    assert!(second > first);
    assert!(third > second);
}

#[test]
fn deleted_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.create_entry("keep", "body").unwrap();
    let deleted = repo.create_entry("drop", "body").unwrap();
    repo.delete_entry(deleted).unwrap();

    let fresh = repo.create_entry("next", "body").unwrap();
    assert!(fresh > deleted);
}

#[test]
fn create_rejects_empty_and_whitespace_only_input() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let title_err = repo.create_entry("", "body").unwrap_err();
    assert!(matches!(title_err, RepoError::Validation(_)));

    let content_err = repo.create_entry("title", "   ").unwrap_err();
    assert!(matches!(content_err, RepoError::Validation(_)));

    assert_eq!(repo.count_entries().unwrap(), 0);
}

#[test]
fn create_preserves_long_titles_without_truncation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let long_title = "t".repeat(300);
    let id = repo.create_entry(&long_title, "body").unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.title, long_title);
}

#[test]
fn update_replaces_fields_and_preserves_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let id = repo.create_entry("draft", "draft body").unwrap();
    backdate_entry(&conn, id, 1_000);

    repo.update_entry(id, "final", "final body").unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.content, "final body");
    assert_eq!(loaded.created_at, 1_000);
    assert!(loaded.updated_at > 1_000);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let err = repo.update_entry(99, "title", "body").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn update_with_invalid_input_leaves_row_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let id = repo.create_entry("original", "original body").unwrap();

    let err = repo.update_entry(id, "", "new body").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.title, "original");
    assert_eq!(loaded.content, "original body");
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let id = repo.create_entry("doomed", "body").unwrap();
    repo.delete_entry(id).unwrap();

    assert!(repo.get_entry(id).unwrap().is_none());
    assert_eq!(repo.count_entries().unwrap(), 0);
}

#[test]
fn delete_on_missing_entry_returns_not_found_without_side_effects() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let id = repo.create_entry("survivor", "body").unwrap();
    repo.delete_entry(id).unwrap();

    let err = repo.delete_entry(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));

    let err = repo.delete_entry(12_345).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(12_345)));
}

#[test]
fn count_tracks_creates_and_deletes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    assert_eq!(repo.count_entries().unwrap(), 0);

    let first = repo.create_entry("one", "body").unwrap();
    repo.create_entry("two", "body").unwrap();
    repo.create_entry("three", "body").unwrap();
    assert_eq!(repo.count_entries().unwrap(), 3);

    repo.delete_entry(first).unwrap();
    assert_eq!(repo.count_entries().unwrap(), 2);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_entries_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("entries"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_entries_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "entries",
            column: "updated_at"
        })
    ));
}

fn backdate_entry(conn: &Connection, id: i64, epoch_ms: i64) {
    conn.execute(
        "UPDATE entries SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        params![epoch_ms, id],
    )
    .unwrap();
}
