//! Database migration system for parkslot.
//!
//! Tracks the schema version in the `metadata` table and brings older
//! databases up to date when the store is opened.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Initialize the database schema.
///
/// Creates all tables if they don't exist, then runs any pending migrations
/// to bring the schema up to the current version.
///
/// # Errors
///
/// Returns an error if schema creation or migration fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = get_schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }
    if version < CURRENT_VERSION {
        run_migrations(conn, version)?;
    }

    Ok(())
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (fresh database).
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        None => Ok(0),
    }
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

/// Run migrations from the given version to the current version.
fn run_migrations(conn: &Connection, from_version: i32) -> Result<()> {
    let mut current = from_version;

    while current < CURRENT_VERSION {
        current += 1;
        run_migration(conn, current)?;
    }

    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Run a specific migration version.
fn run_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => set_schema_version(conn, 1),
        _ => Err(Error::DatabaseMigration {
            message: format!("unknown migration version: {version}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let conn = create_test_db();
        initialize_schema(&conn).expect("failed to initialize schema");

        assert!(table_exists(&conn, "parking_slots"));
        assert!(table_exists(&conn, "metadata"));
    }

    #[test]
    fn test_initialize_schema_sets_version() {
        let conn = create_test_db();
        initialize_schema(&conn).expect("failed to initialize schema");

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let conn = create_test_db();

        initialize_schema(&conn).expect("first init failed");
        initialize_schema(&conn).expect("second init failed");

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_get_schema_version_fresh_db() {
        let conn = create_test_db();
        conn.execute(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);
    }

    #[test]
    fn test_set_and_get_schema_version() {
        let conn = create_test_db();
        conn.execute(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();

        set_schema_version(&conn, 42).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 42);
    }

    #[test]
    fn test_invalid_schema_version() {
        let conn = create_test_db();
        conn.execute(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES ('schema_version', 'abc')",
            [],
        )
        .unwrap();

        let err = get_schema_version(&conn).unwrap_err();
        assert!(err.to_string().contains("invalid schema version"));
    }

    #[test]
    fn test_newer_schema_version_rejected() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();
        set_schema_version(&conn, CURRENT_VERSION + 1).unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_run_migration_unknown_version() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        let err = run_migration(&conn, 999).unwrap_err();
        assert!(err.to_string().contains("unknown migration version"));
    }

    #[test]
    fn test_check_constraint_rejects_occupied_without_code() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO parking_slots (slot_number, is_occupied, issued_code) VALUES ('A1', 1, NULL)",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO parking_slots (slot_number, is_occupied, issued_code) VALUES ('A1', 0, 'x')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_slot_number_unique() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        conn.execute("INSERT INTO parking_slots (slot_number) VALUES ('A1')", [])
            .unwrap();
        let result = conn.execute("INSERT INTO parking_slots (slot_number) VALUES ('A1')", []);
        assert!(result.is_err());
    }
}
