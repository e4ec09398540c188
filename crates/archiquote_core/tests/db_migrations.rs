use archiquote_core::db::migrations::latest_version;
use archiquote_core::db::{open_db, open_db_in_memory, DbError};
use archiquote_core::{RepoError, SlotStorage, SqliteSlotStorage};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_slot_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_slots");
}

#[test]
fn reopening_keeps_schema_and_slot_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archiquote.sqlite3");

    let storage = SqliteSlotStorage::open(&path).unwrap();
    storage.set("archiquote_db", "{}").unwrap();
    drop(storage);

    let storage = SqliteSlotStorage::open(&path).unwrap();
    assert_eq!(schema_version(storage.connection()), latest_version());
    assert_eq!(
        storage.get("archiquote_db").unwrap().as_deref(),
        Some("{}")
    );
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = SqliteSlotStorage::open(&path).err().unwrap();
    assert!(matches!(
        err,
        RepoError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
