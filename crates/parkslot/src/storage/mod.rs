//! Storage layer for parkslot.
//!
//! This module provides `SQLite`-based persistent storage for the slot set.
//! The store owns a single connection; callers that share it across threads
//! wrap it in a mutex (see [`crate::service::SlotService`]).

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::slot::{slot_number_at, ParkingSlot};

/// Storage engine for parking slots.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Ordered listing and lookup by slot number
/// - Single-row occupancy updates
/// - Atomic replacement of the whole slot set
#[derive(Debug)]
pub struct SlotStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SlotStore {
    /// Open or create a slot database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store, used by tests and dry runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the underlying connection, flushing any pending state.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` refuses to close the connection.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| Error::DatabaseQuery(source))?;
        debug!("Closed database at {}", path.display());
        Ok(())
    }

    /// List every slot, ordered by slot number.
    ///
    /// Ordering is lexicographic on the stored string, so `A10` sorts before
    /// `A2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_all(&self) -> Result<Vec<ParkingSlot>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT slot_number, is_occupied, issued_code
            FROM parking_slots ORDER BY slot_number ASC
            ",
        )?;

        let slots = stmt
            .query_map([], Self::row_to_slot)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(slots)
    }

    /// Get a slot by its slot number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_by_slot_number(&self, slot_number: &str) -> Result<Option<ParkingSlot>> {
        let slot = self
            .conn
            .query_row(
                r"
                SELECT slot_number, is_occupied, issued_code
                FROM parking_slots WHERE slot_number = ?1
                ",
                [slot_number],
                Self::row_to_slot,
            )
            .optional()?;
        Ok(slot)
    }

    /// Overwrite the occupancy and issued code of an existing slot.
    ///
    /// Returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `issued_code` is present for a
    /// vacant slot or missing for an occupied one, [`Error::SlotNotFound`] if
    /// no row matches, or a database error.
    pub fn upsert_occupancy(
        &self,
        slot_number: &str,
        is_occupied: bool,
        issued_code: Option<&str>,
    ) -> Result<ParkingSlot> {
        if is_occupied != issued_code.is_some() {
            return Err(Error::invalid_argument(
                "an issued code must be present exactly when the slot is occupied",
            ));
        }

        let updated = self
            .conn
            .query_row(
                r"
                UPDATE parking_slots SET is_occupied = ?1, issued_code = ?2
                WHERE slot_number = ?3
                RETURNING slot_number, is_occupied, issued_code
                ",
                params![is_occupied, issued_code, slot_number],
                Self::row_to_slot,
            )
            .optional()?;

        let slot = updated.ok_or_else(|| Error::slot_not_found(slot_number))?;
        debug!(
            "Updated slot {} (occupied: {})",
            slot.slot_number, slot.is_occupied
        );
        Ok(slot)
    }

    /// Destroy every slot and create `count` vacant slots named `A1..A<count>`.
    ///
    /// Runs in a single transaction: either the new set is fully visible or the
    /// previous set remains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `count` is not a positive integer
    /// that fits a slot position, or a database error.
    pub fn replace_all(&mut self, count: i64) -> Result<u32> {
        let count = u32::try_from(count)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "number of slots must be a positive integer, got {count}"
                ))
            })?;

        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM parking_slots", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO parking_slots (slot_number, is_occupied, issued_code) VALUES (?1, 0, NULL)",
            )?;
            for position in 1..=count {
                stmt.execute([slot_number_at(position)])?;
            }
        }
        tx.commit()?;

        info!("Replaced {} slots with {} new slots", removed, count);
        Ok(count)
    }

    /// Count all slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM parking_slots", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get occupancy statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<SlotStats> {
        let (total, occupied): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_occupied), 0) FROM parking_slots",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(SlotStats {
            total,
            occupied,
            vacant: total - occupied,
        })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Convert a database row to a `ParkingSlot`.
    fn row_to_slot(row: &rusqlite::Row) -> rusqlite::Result<ParkingSlot> {
        Ok(ParkingSlot {
            slot_number: row.get(0)?,
            is_occupied: row.get(1)?,
            issued_code: row.get(2)?,
        })
    }
}

/// Occupancy statistics for the slot set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SlotStats {
    /// Total number of slots.
    pub total: i64,
    /// Slots currently occupied.
    pub occupied: i64,
    /// Slots currently vacant.
    pub vacant: i64,
}
