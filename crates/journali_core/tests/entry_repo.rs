use journali_core::db::migrations::latest_version;
use journali_core::db::open_db_in_memory;
use journali_core::{Entry, EntryRepository, RepoError, SqliteEntryRepository};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut entry = Entry::new("Trip", "Paris", 1_000);
    entry.toggle_bookmark(1_500);
    repo.insert_entry(&entry).unwrap();

    let loaded = repo.get_entry(entry.id).unwrap().unwrap();
    assert_eq!(loaded, entry);
}

#[test]
fn list_orders_by_updated_at_desc_then_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let older = Entry::new("older", "", 100);
    let tie_b = entry_with_fixed_id("00000000-0000-4000-8000-000000000002", 200);
    let tie_a = entry_with_fixed_id("00000000-0000-4000-8000-000000000001", 200);
    repo.insert_entry(&older).unwrap();
    repo.insert_entry(&tie_b).unwrap();
    repo.insert_entry(&tie_a).unwrap();

    let ids: Vec<_> = repo
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(ids, vec![tie_a.id, tie_b.id, older.id]);
}

#[test]
fn update_overwrites_content_but_never_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut entry = Entry::new("draft", "body", 1_000);
    repo.insert_entry(&entry).unwrap();

    entry.edit("final", "new body", 2_000);
    entry.created_at = 1_500;
    repo.update_entry(&entry).unwrap();

    let loaded = repo.get_entry(entry.id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.body, "new body");
    assert_eq!(loaded.updated_at, 2_000);
    assert_eq!(loaded.created_at, 1_000);
}

#[test]
fn update_and_delete_missing_rows_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = Entry::new("ghost", "", 0);
    assert!(matches!(
        repo.update_entry(&entry),
        Err(RepoError::NotFound(id)) if id == entry.id
    ));
    assert!(matches!(
        repo.delete_entry(entry.id),
        Err(RepoError::NotFound(id)) if id == entry.id
    ));
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = Entry::new("gone", "", 0);
    repo.insert_entry(&entry).unwrap();
    repo.delete_entry(entry.id).unwrap();

    assert!(repo.get_entry(entry.id).unwrap().is_none());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn validation_failure_blocks_writes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut invalid = Entry::new("bad", "", 500);
    invalid.updated_at = 100;
    assert!(matches!(
        repo.insert_entry(&invalid),
        Err(RepoError::Validation(_))
    ));
}

#[test]
fn read_rejects_invalid_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    conn.execute(
        "INSERT INTO entries (id, title, body, created_at, updated_at, is_bookmarked)
         VALUES ('not-a-uuid', 't', 'b', 1, 1, 0);",
        [],
    )
    .unwrap();

    assert!(matches!(
        repo.list_entries(),
        Err(RepoError::InvalidData(message)) if message.contains("not-a-uuid")
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEntryRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_entries_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteEntryRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("entries"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE entries (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteEntryRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "entries",
            column: "is_bookmarked"
        })
    ));
}

fn entry_with_fixed_id(id: &str, now_ms: i64) -> Entry {
    Entry::with_id(Uuid::parse_str(id).unwrap(), "fixed", "", now_ms)
}
