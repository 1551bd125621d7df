//! `SQLite` schema definitions for parkslot.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the parking slots table.
///
/// The `CHECK` constraint mirrors the rule that a code is stored exactly when
/// the slot is occupied.
pub const CREATE_PARKING_SLOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS parking_slots (
    id INTEGER PRIMARY KEY,
    slot_number TEXT NOT NULL UNIQUE,
    is_occupied INTEGER NOT NULL DEFAULT 0 CHECK (is_occupied IN (0, 1)),
    issued_code TEXT,
    CHECK ((is_occupied = 1) = (issued_code IS NOT NULL))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_PARKING_SLOTS_TABLE, CREATE_METADATA_TABLE];
